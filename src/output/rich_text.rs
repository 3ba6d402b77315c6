use crate::portfolio::{RichText, RichTextFormat};
use tracing::warn;
use yew::{html, Html};

pub fn rich_text_html(text: &RichText, class: &'static str) -> Html {
    match text.format {
        RichTextFormat::PlainText => text
            .content
            .lines()
            .map(|line| {
                html! {
                    <p {class}>{line}</p>
                }
            })
            .collect(),
        RichTextFormat::Markdown => {
            let mut options = markdown::Options::gfm();
            options.compile.allow_dangerous_html = true;
            match markdown::to_html_with_options(&text.content, &options) {
                Ok(content) => Html::from_html_unchecked(content.into()),
                Err(error) => {
                    warn!(event = "output.markdown_failed", error = ?error);
                    rich_text_html(&RichText::plain_text(text.content.clone()), class)
                }
            }
        }
        RichTextFormat::Html => Html::from_html_unchecked(text.content.clone().into()),
    }
}
