#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub content: String,
    pub format: RichTextFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichTextFormat {
    /// Each line is its own paragraph.
    PlainText,
    Markdown,
    /// Trusted markup from the portfolio sources, emitted as-is.
    Html,
}

impl RichText {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: RichTextFormat::PlainText,
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: RichTextFormat::Markdown,
        }
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: RichTextFormat::Html,
        }
    }
}
