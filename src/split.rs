//! UTF-8 感知的明文分段。
//!
//! 按码点从左到右累计 UTF-8 编码长度，分段边界严格落在码点之间，
//! 多字节码点永远不会被拆进两个相邻分段。

/// 将文本切分为字节长度受 `max_bytes` 约束的有序分段
///
/// 当前码点计入后累计字节数达到或超过 `max_bytes` 即关闭当前分段，
/// 因此单个分段最多可超出预算 3 字节（一个完整的 4 字节码点）。
/// 空输入返回单个空分段。
pub fn split_utf8(text: &str, max_bytes: usize) -> Vec<&str> {
    if text.is_empty() {
        return vec![""];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut byte_count = 0;

    for (idx, ch) in text.char_indices() {
        let end = idx + ch.len_utf8();
        byte_count += ch.len_utf8();

        if byte_count >= max_bytes || end == text.len() {
            segments.push(&text[start..end]);
            start = end;
            byte_count = 0;
        }
    }

    segments
}
