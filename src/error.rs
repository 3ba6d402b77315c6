use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("couldn't access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glob '{pattern}': {message}")]
    Glob { pattern: String, message: String },

    #[error("project '{id}' is defined more than once")]
    DuplicateProject { id: String },

    #[error("project id '{id}' must be non-empty and use only ASCII letters, digits, '-' or '_'")]
    InvalidProjectId { id: String },

    #[error("couldn't write sitemap: {message}")]
    Sitemap { message: String },

    #[error("couldn't render {path}: {message}")]
    Render { path: String, message: String },

    #[error(
        "output directory {} contains the portfolio sources in {}",
        output.display(),
        sources.display()
    )]
    OutputContainsSources { output: PathBuf, sources: PathBuf },

    #[error("couldn't bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::DuplicateProject {
            id: "project1".to_owned(),
        };
        assert_eq!(error.to_string(), "project 'project1' is defined more than once");

        let error = Error::io("demo/showcase.toml")(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(error.to_string(), "couldn't access demo/showcase.toml: missing");
    }
}
