use crate::portfolio::{RichText, Slide};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids become URL path segments.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Markdown.
    #[serde(default, alias = "fullDescription")]
    pub full_description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, alias = "techStack")]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    /// Any other home of the project, such as a video channel.
    #[serde(default, alias = "Url")]
    pub url: Option<String>,
    #[serde(default)]
    pub url_label: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub order: i64,
}

impl Project {
    /// External links in display order.
    pub fn links(&self) -> Vec<Link> {
        let named = [
            (self.github.as_ref(), "GitHub"),
            (self.demo.as_ref(), "Demo"),
            (
                self.url.as_ref(),
                self.url_label.as_deref().unwrap_or("Website"),
            ),
        ];
        named
            .into_iter()
            .filter_map(|(href, label)| {
                href.map(|href| Link {
                    label: label.to_owned(),
                    href: href.clone(),
                })
            })
            .chain(self.links.iter().cloned())
            .collect()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn full_description(&self) -> Option<RichText> {
        self.full_description
            .as_ref()
            .filter(|text| !text.trim().is_empty())
            .map(RichText::markdown)
    }
}
