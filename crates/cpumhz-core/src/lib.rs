//! 处理器频率读取核心库
//!
//! 设计要点：
//! - 流式读取 `/proc/cpuinfo`（或任意文本源），单次线性扫描，不预读整个文件。
//! - 字段扫描器把每个 `cpu MHz` 字段的数值写成换行分隔的文本缓冲区。
//! - 汇总器只依赖该文本格式：求最大值，或按数值升序稳定排序后输出全部读数。

mod aggregate;
mod buffer;
mod error;
mod field_scanner;
mod options;
mod readings;
mod scan;

pub use aggregate::{max_mhz, parse_readings, reduce, sorted_readings, ScanResult};
pub use buffer::{RawValueBuffer, INITIAL_BUFFER_CAPACITY};
pub use error::{Result, ScanError};
pub use field_scanner::{scan_file, FieldScanner};
pub use options::{ReportMode, ScanOptions, ScanStats, DEFAULT_LABEL, DEFAULT_SOURCE};
pub use readings::CoreReading;
pub use scan::{scan_once, Sampler};
