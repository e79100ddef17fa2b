//! 错误类型
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// 数据源无法打开或读取（致命）
    #[error("Error reading {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("field label must not be empty")]
    EmptyLabel,
}

pub type Result<T> = std::result::Result<T, ScanError>;
