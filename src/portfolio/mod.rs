use crate::{Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;
use wax::Glob;

mod catalog;
mod config;
mod order;
mod project;
mod rich_text;
mod sections;
mod slide;

pub use catalog::*;
pub use config::*;
pub use order::*;
pub use project::*;
pub use rich_text::*;
pub use sections::*;
pub use slide::*;

#[derive(Debug)]
pub struct Portfolio {
    pub config: PortfolioConfig,
    pub sections: Sections,
    pub catalog: Catalog,
    pub static_files: Vec<StaticFile>,
    /// Directory containing the config file. Other source paths are relative to it.
    pub root: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticFile {
    /// Public path, with leading slash.
    pub path: String,
    pub contents: Vec<u8>,
}

impl Portfolio {
    pub fn load(config_path: &Path) -> Result<Self> {
        let text = fs::read_to_string(config_path).map_err(Error::io(config_path))?;
        let parse_error = |source| Error::Toml {
            path: config_path.to_owned(),
            source,
        };
        let config = toml::from_str::<PortfolioConfig>(&text).map_err(parse_error)?;
        let sections = toml::from_str::<Sections>(&text).map_err(parse_error)?;

        let root = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        };

        let catalog = load_catalog(&root, &config.projects)?;
        let static_dir = root.join(&config.static_dir);
        let static_files = if static_dir.is_dir() {
            load_static_files(&static_dir)?
        } else {
            Vec::new()
        };

        Ok(Self {
            config,
            sections,
            catalog,
            static_files,
            root,
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir(&self.root)
    }
}

fn glob_error(pattern: &str, error: impl std::fmt::Display) -> Error {
    Error::Glob {
        pattern: pattern.to_owned(),
        message: error.to_string(),
    }
}

fn load_catalog(root: &Path, pattern: &str) -> Result<Catalog> {
    let glob = Glob::new(pattern).map_err(|e| glob_error(pattern, e))?;

    let mut entries = Vec::new();
    for entry in glob.walk(root) {
        let entry = entry.map_err(|e| glob_error(pattern, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let src_key = entry.matched().complete().to_owned();
        let text = fs::read_to_string(entry.path()).map_err(Error::io(entry.path()))?;
        let project = toml::from_str::<Project>(&text).map_err(|source| Error::Toml {
            path: entry.path().to_owned(),
            source,
        })?;
        debug!(
            event = "portfolio.project_loaded",
            id = %project.id,
            slides = project.slides.len(),
            src = %src_key,
        );
        entries.push((project, src_key));
    }

    entries.sort_by_key(|(project, src_key)| Order::new(project, src_key));
    Catalog::new(entries.into_iter().map(|(project, _)| project).collect())
}

fn load_static_files(dir: &Path) -> Result<Vec<StaticFile>> {
    let mut files = Vec::new();
    let glob = Glob::new("**").map_err(|e| glob_error("**", e))?;
    for entry in glob.walk(dir) {
        let entry = entry.map_err(|e| glob_error("**", e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = format!("/{}", entry.matched().complete());
        let contents = fs::read(entry.path()).map_err(Error::io(entry.path()))?;
        debug!(event = "portfolio.static_file_loaded", path = %path, bytes = contents.len());
        files.push(StaticFile { path, contents });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// A project whose slides are plain text.
    pub fn project(id: &str, slides: usize) -> Project {
        let slides = (0..slides)
            .map(|i| {
                format!(
                    "[[slides]]\ntype = \"text\"\ntitle = \"Slide {}\"\ncontent = \"line\"\n",
                    i + 1
                )
            })
            .collect::<String>();
        toml::from_str(&format!("id = \"{id}\"\nname = \"Project {id}\"\n{slides}")).unwrap()
    }

    /// `p1` with three slides and `p2` with none.
    pub fn catalog() -> Catalog {
        Catalog::new(vec![project("p1", 3), project("p2", 0)]).unwrap()
    }

    pub fn portfolio() -> Portfolio {
        Portfolio {
            config: toml::from_str("title = \"Test Portfolio\"\ncopyright_year = 2025").unwrap(),
            sections: Sections::default(),
            catalog: catalog(),
            static_files: Vec::new(),
            root: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, path: &str, contents: &str) {
        let path = dir.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "showcase.toml",
            "title = \"Portfolio\"\n[contact]\nheading = \"Say hi\"\n",
        );
        write(
            dir.path(),
            "projects/b.toml",
            "id = \"second\"\nname = \"Second\"\n",
        );
        write(
            dir.path(),
            "projects/a.toml",
            "id = \"first\"\nname = \"First\"\n[[slides]]\ntype = \"title\"\ntitle = \"Hi\"\n",
        );
        write(dir.path(), "static/img/main.png", "png");

        let portfolio = Portfolio::load(&dir.path().join("showcase.toml")).unwrap();
        assert_eq!(portfolio.config.title, "Portfolio");
        assert_eq!(
            portfolio.sections.contact.as_ref().map(|c| c.heading.as_str()),
            Some("Say hi")
        );
        assert_eq!(
            portfolio
                .catalog
                .iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>(),
            ["first", "second"]
        );
        assert_eq!(portfolio.static_files.len(), 1);
        assert_eq!(portfolio.static_files[0].path, "/img/main.png");
        assert_eq!(portfolio.output_dir(), dir.path().join("./output"));
    }

    #[test]
    fn test_duplicate_across_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "showcase.toml", "");
        write(dir.path(), "projects/a.toml", "id = \"same\"\nname = \"A\"\n");
        write(dir.path(), "projects/b.toml", "id = \"same\"\nname = \"B\"\n");

        let error = Portfolio::load(&dir.path().join("showcase.toml")).unwrap_err();
        assert!(matches!(error, Error::DuplicateProject { .. }));
    }

    #[test]
    fn test_bad_project_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "showcase.toml", "");
        write(dir.path(), "projects/broken.toml", "id = 3");

        let error = Portfolio::load(&dir.path().join("showcase.toml")).unwrap_err();
        assert!(error.to_string().contains("broken.toml"), "{error}");
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let error = Portfolio::load(&dir.path().join("showcase.toml")).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }
}
