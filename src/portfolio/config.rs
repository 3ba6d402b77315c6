use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PortfolioConfig {
    /// Relative to the config file.
    #[serde(default = "default_output")]
    pub output: String,
    /// Glob of project files, relative to the config file.
    #[serde(default = "default_projects")]
    pub projects: String,
    /// Copied verbatim to the output root.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_title")]
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub root_url: Option<String>,
    /// Square image served from the static directory, used for the favicon and web manifest.
    pub icon: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub copyright_year: Option<i32>,
    #[serde(default)]
    pub labels: Labels,
}

fn default_output() -> String {
    String::from("./output")
}

fn default_projects() -> String {
    String::from("projects/*.toml")
}

fn default_static_dir() -> String {
    String::from("static")
}

fn default_addr() -> String {
    String::from("0.0.0.0:8080")
}

fn default_title() -> String {
    "My Portfolio".to_owned()
}

fn default_language() -> String {
    "en".to_owned()
}

impl PortfolioConfig {
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }

    pub fn copyright_year(&self) -> i32 {
        self.copyright_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// Text of the navigation and modal controls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub home: String,
    pub about: String,
    pub projects: String,
    pub contact: String,
    pub close: String,
    pub overview: String,
    pub slideshow: String,
    pub presentation: String,
    pub back: String,
    pub previous: String,
    pub next: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            home: "Home".to_owned(),
            about: "About & Skills".to_owned(),
            projects: "Projects".to_owned(),
            contact: "Contact".to_owned(),
            close: "Close".to_owned(),
            overview: "Overview".to_owned(),
            slideshow: "View presentation".to_owned(),
            presentation: "Presentation".to_owned(),
            back: "Back to overview".to_owned(),
            previous: "Previous".to_owned(),
            next: "Next".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: PortfolioConfig = toml::from_str("").unwrap();
        assert_eq!(config.output, "./output");
        assert_eq!(config.projects, "projects/*.toml");
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.labels, Labels::default());
        assert!(config.root_url.is_none());
    }

    #[test]
    fn test_partial_labels() {
        let config: PortfolioConfig = toml::from_str(
            r#"
            title = "Yoon Yeo Won"
            copyright_year = 2025

            [labels]
            close = "닫기"
            "#,
        )
        .unwrap();
        assert_eq!(config.title, "Yoon Yeo Won");
        assert_eq!(config.copyright_year(), 2025);
        assert_eq!(config.labels.close, "닫기");
        assert_eq!(config.labels.next, "Next");
    }
}
