//! 扫描选项与统计信息（模块）
use std::path::PathBuf;

/// 默认数据源：内核导出的处理器信息伪文件
pub const DEFAULT_SOURCE: &str = "/proc/cpuinfo";
/// 默认字段标签（区分大小写，精确字节匹配）
pub const DEFAULT_LABEL: &str = "cpu MHz";

/// 汇总模式
/// - Max：只报告所有核心中的最大频率
/// - All：报告全部核心频率（升序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Max,
    All,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 数据源路径；默认 /proc/cpuinfo
    pub source: PathBuf,
    /// 要查找的字段标签
    pub label: String,
    /// 汇总模式
    pub mode: ReportMode,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            label: DEFAULT_LABEL.to_string(),
            mode: ReportMode::Max,
        }
    }
}

/// 单次扫描的统计信息（便于调试日志）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub bytes_read: usize,
    /// 标签命中次数
    pub fields_matched: usize,
    /// 成功提取数值的次数
    pub values_extracted: usize,
    /// 命中标签但直到流结束都没有数字的次数
    pub fields_without_value: usize,
}
