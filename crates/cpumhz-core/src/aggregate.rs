//! 汇总：把换行分隔的数值序列归约为最大值或升序列表
use std::fmt;

use crate::buffer::RawValueBuffer;
use crate::options::ReportMode;
use crate::readings::{parse_leading_decimal, sort_readings_stable, CoreReading};

/// 单次扫描的汇总结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScanResult {
    /// 最大频率（无读数时为 0）
    Max(f64),
    /// 全部频率，升序
    All(Vec<f64>),
}

/// 输出格式：固定两位小数；列表以 ", " 连接，空列表为空串
impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanResult::Max(mhz) => write!(f, "{mhz:.2}"),
            ScanResult::All(values) => {
                for (i, mhz) in values.iter().enumerate() {
                    if i != 0 { f.write_str(", ")?; }
                    write!(f, "{mhz:.2}")?;
                }
                Ok(())
            }
        }
    }
}

/// 解析缓冲区中的全部读数（按出现顺序编号）
pub fn parse_readings(buffer: &RawValueBuffer) -> Vec<CoreReading> {
    buffer
        .tokens()
        .filter_map(parse_leading_decimal)
        .enumerate()
        .map(|(ordinal, mhz)| CoreReading { ordinal, mhz })
        .collect()
}

/// 最大频率，基线为 0
pub fn max_mhz(buffer: &RawValueBuffer) -> f64 {
    buffer
        .tokens()
        .filter_map(parse_leading_decimal)
        .fold(0.0, f64::max)
}

/// 全部读数，按数值升序；数值相同保持出现顺序
pub fn sorted_readings(buffer: &RawValueBuffer) -> Vec<CoreReading> {
    let mut readings = parse_readings(buffer);
    sort_readings_stable(&mut readings);
    readings
}

pub fn reduce(buffer: &RawValueBuffer, mode: ReportMode) -> ScanResult {
    match mode {
        ReportMode::Max => ScanResult::Max(max_mhz(buffer)),
        ReportMode::All => ScanResult::All(sorted_readings(buffer).into_iter().map(|r| r.mhz).collect()),
    }
}
