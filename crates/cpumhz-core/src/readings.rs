//! 单核读数与排序（内部使用）

/// 单个核心的频率读数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreReading {
    /// 本次扫描中的出现序号（从 0 开始），不是处理器编号
    pub ordinal: usize,
    pub mhz: f64,
}

/// 解析记录开头最长的十进制前缀（`digits [ '.' digits ]`）
///
/// 行尾可能带有 `\r` 或空格，这些都被忽略；没有数字前缀时返回 None。
pub(crate) fn parse_leading_decimal(token: &[u8]) -> Option<f64> {
    let int_len = token.iter().take_while(|b| b.is_ascii_digit()).count();
    if int_len == 0 { return None; }
    let mut end = int_len;
    if token.get(end) == Some(&b'.') {
        end += 1 + token[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    // 前缀只含 ASCII 数字与小数点
    std::str::from_utf8(&token[..end]).ok()?.parse::<f64>().ok()
}

/// 按数值升序稳定排序：数值相同则保持出现顺序
pub(crate) fn sort_readings_stable(readings: &mut [CoreReading]) {
    readings.sort_by(|a, b| a.mhz.total_cmp(&b.mhz).then(a.ordinal.cmp(&b.ordinal)));
}
