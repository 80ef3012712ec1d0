//! Markdown text to description blocks.

/// One description block. The outline model stores descriptions line by line.
pub type Block = String;

/// Splits raw editor text into the block form the HTML representation reads.
pub trait MarkdownParser {
    fn parse(&self, raw: &str) -> Vec<Block>;
}

/// Line-oriented parser matching the outline file layout.
///
/// `\r\n` and lone `\r` are normalized to `\n`; a single trailing newline
/// does not produce an extra empty block.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBlockParser;

impl MarkdownParser for LineBlockParser {
    fn parse(&self, raw: &str) -> Vec<Block> {
        if raw.is_empty() {
            return Vec::new();
        }
        let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
        let trimmed = normalized.strip_suffix('\n').unwrap_or(&normalized);
        trimmed.split('\n').map(str::to_string).collect()
    }
}
