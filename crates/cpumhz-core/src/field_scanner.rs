//! 字段扫描器（流式读取 + 滑动窗口匹配）
//!
//! 设计要点：
//! - 不整读文件：通过 `BufRead::fill_buf` 逐块喂入状态机，块边界对结果不可见。
//! - 用长度等于标签的滑动窗口做精确字节匹配；命中后清空窗口，从头重新填充。
//! - 命中后跳到第一个数字，再把数字起到行尾（不含换行）的字节写入输出缓冲区。
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::buffer::RawValueBuffer;
use crate::error::{Result, ScanError};
use crate::options::ScanStats;

/// 扫描器状态（逐字节迁移）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// 窗口尚未填满
    FillingWindow,
    /// 窗口已满，逐字节滑动比较
    Watching,
    /// 已命中标签，跳过非数字字节
    SkippingToDigit,
    /// 正在收集数值，直到换行
    CollectingNumber,
}

/// 增量字段扫描器
///
/// 可以多次调用 [`FieldScanner::feed`] 喂入任意切分的数据块，最后调用
/// [`FieldScanner::finish`] 处理流结束。
pub struct FieldScanner {
    label: Vec<u8>,
    window: VecDeque<u8>,
    state: State,
    stats: ScanStats,
}

impl FieldScanner {
    pub fn new(label: &str) -> Result<Self> {
        if label.is_empty() {
            return Err(ScanError::EmptyLabel);
        }
        let label = label.as_bytes().to_vec();
        let window = VecDeque::with_capacity(label.len());
        Ok(Self { label, window, state: State::FillingWindow, stats: ScanStats::default() })
    }

    /// 喂入一个数据块，命中的数值追加到 `out`
    pub fn feed(&mut self, chunk: &[u8], out: &mut RawValueBuffer) {
        self.stats.bytes_read += chunk.len();
        let mut i = 0;
        while i < chunk.len() {
            match self.state {
                State::FillingWindow | State::Watching => {
                    self.slide(chunk[i]);
                    i += 1;
                }
                State::SkippingToDigit => {
                    match chunk[i..].iter().position(u8::is_ascii_digit) {
                        Some(off) => {
                            i += off;
                            self.state = State::CollectingNumber;
                        }
                        None => i = chunk.len(),
                    }
                }
                State::CollectingNumber => {
                    let rest = &chunk[i..];
                    match rest.iter().position(|&b| b == b'\n') {
                        Some(end) => {
                            out.extend(&rest[..end]);
                            out.end_token();
                            self.stats.values_extracted += 1;
                            self.reset_window();
                            // 换行本身被消费，不进入窗口
                            i += end + 1;
                        }
                        None => {
                            out.extend(rest);
                            i = chunk.len();
                        }
                    }
                }
            }
        }
    }

    /// 处理流结束，返回本次扫描的统计信息并把扫描器复位
    pub fn finish(&mut self, out: &mut RawValueBuffer) -> ScanStats {
        match self.state {
            State::CollectingNumber => {
                out.end_token();
                self.stats.values_extracted += 1;
            }
            State::SkippingToDigit => {
                // 命中但没有数字：静默跳过
                self.stats.fields_without_value += 1;
            }
            State::FillingWindow | State::Watching => {}
        }
        self.reset_window();
        std::mem::take(&mut self.stats)
    }

    /// 读取整个流（分块），结果追加到 `out`
    pub fn scan<R: BufRead>(&mut self, mut reader: R, out: &mut RawValueBuffer) -> std::io::Result<ScanStats> {
        loop {
            let chunk = reader.fill_buf()?;
            if chunk.is_empty() { break; }
            let n = chunk.len();
            self.feed(chunk, out);
            reader.consume(n);
        }
        Ok(self.finish(out))
    }

    /// 单字节推进滑动窗口：先顺序填满，之后左移一位
    fn slide(&mut self, b: u8) {
        if self.window.len() == self.label.len() {
            self.window.pop_front();
        }
        self.window.push_back(b);
        if self.window.len() < self.label.len() {
            return;
        }
        if self.window.iter().eq(self.label.iter()) {
            self.stats.fields_matched += 1;
            self.window.clear();
            self.state = State::SkippingToDigit;
        } else {
            self.state = State::Watching;
        }
    }

    fn reset_window(&mut self) {
        self.window.clear();
        self.state = State::FillingWindow;
    }
}

/// 扫描单个文件：先清空 `out`，再以流式方式读取 `path`
pub fn scan_file(path: &Path, label: &str, out: &mut RawValueBuffer) -> Result<ScanStats> {
    let mut scanner = FieldScanner::new(label)?;
    let unavailable = |source| ScanError::SourceUnavailable { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(unavailable)?;
    out.clear();
    let stats = scanner.scan(BufReader::new(file), out).map_err(unavailable)?;

    debug!(
        path = %path.display(),
        bytes_read = stats.bytes_read,
        fields_matched = stats.fields_matched,
        values_extracted = stats.values_extracted,
        "field scan finished"
    );
    Ok(stats)
}
