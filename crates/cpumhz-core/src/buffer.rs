//! 原始数值缓冲区：每次命中追加一个 `<数值>\n`

/// 初始预留容量（字节）。之后由 Vec 按倍数自动增长，没有上限。
pub const INITIAL_BUFFER_CAPACITY: usize = 10 * 1024; // 10 KiB

/// 换行分隔的数值文本
///
/// 扫描期间只追加；每次新扫描前清空。底层存储可以在重复模式的多轮之间复用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValueBuffer {
    bytes: Vec<u8>,
}

impl Default for RawValueBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RawValueBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::with_capacity(INITIAL_BUFFER_CAPACITY) }
    }

    /// 清空内容（保留已分配的容量）
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 追加一个完整的数值记录（自动补分隔符）
    pub fn push_token(&mut self, token: &str) {
        self.extend(token.as_bytes());
        self.end_token();
    }

    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// 写入分隔符，结束当前记录
    pub(crate) fn end_token(&mut self) {
        self.bytes.push(b'\n');
    }

    /// 按出现顺序遍历每个记录（不含分隔符）
    pub fn tokens(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.bytes.split(|&b| b == b'\n').filter(|t| !t.is_empty())
    }
}
