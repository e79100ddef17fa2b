//! 扫描主流程：读取数据源 → 提取数值 → 汇总
use tracing::debug;

use crate::aggregate::{reduce, ScanResult};
use crate::buffer::RawValueBuffer;
use crate::error::Result;
use crate::field_scanner::scan_file;
use crate::options::{ScanOptions, ScanStats};

/// 采样器：持有一个可复用的数值缓冲区，每次采样前清空
///
/// 重复模式下反复调用 [`Sampler::sample`]，缓冲区容量在各轮之间保留。
#[derive(Debug)]
pub struct Sampler {
    opts: ScanOptions,
    buffer: RawValueBuffer,
    last_stats: ScanStats,
}

impl Sampler {
    pub fn new(opts: ScanOptions) -> Self {
        Self { opts, buffer: RawValueBuffer::new(), last_stats: ScanStats::default() }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.opts
    }

    /// 最近一次采样的统计信息
    pub fn last_stats(&self) -> &ScanStats {
        &self.last_stats
    }

    /// 执行一次完整扫描并按模式汇总
    pub fn sample(&mut self) -> Result<ScanResult> {
        self.last_stats = scan_file(&self.opts.source, &self.opts.label, &mut self.buffer)?;
        let result = reduce(&self.buffer, self.opts.mode);
        debug!(mode = ?self.opts.mode, readings = self.last_stats.values_extracted, %result, "sample done");
        Ok(result)
    }
}

/// 单次扫描的便捷入口（不复用缓冲区）
pub fn scan_once(opts: &ScanOptions) -> Result<ScanResult> {
    Sampler::new(opts.clone()).sample()
}
