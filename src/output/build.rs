use crate::{
    output::Output,
    util::{progress_bar, recursively_remove_empty_dirs_of_contents},
    Error, Result,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::{fs, path::Path, time::Instant};
use tracing::{debug, info};
use wax::Glob;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub written: usize,
    pub removed: usize,
}

/// Writes every output file under `dir`, removing files from earlier builds that are no longer produced.
///
/// Refuses to touch a `dir` that is, or contains, the `sources` directory.
pub fn build(
    start: Instant,
    dir: &Path,
    sources: &Path,
    output: &Output<'_>,
) -> Result<BuildSummary> {
    check_outside_sources(dir, sources)?;
    fs::create_dir_all(dir).map_err(Error::io(dir))?;

    let mut removed = 0usize;
    let glob = Glob::new("**").map_err(|e| Error::Glob {
        pattern: "**".to_owned(),
        message: e.to_string(),
    })?;
    for file in glob.walk(dir) {
        let file = file.map_err(|e| Error::Glob {
            pattern: "**".to_owned(),
            message: e.to_string(),
        })?;
        if !file.file_type().is_file() {
            continue;
        }
        let path = format!("/{}", file.matched().complete());
        if !output.contains_key(&path) {
            debug!(event = "output.obsolete_removed", path = %path);
            fs::remove_file(file.path()).map_err(Error::io(file.path()))?;
            removed += 1;
        }
    }
    recursively_remove_empty_dirs_of_contents(dir).map_err(Error::io(dir))?;

    let progress = progress_bar("Saving website...", output.len(), start);

    output.par_iter().try_for_each(|(path, contents)| {
        let destination = dir.join(path.trim_start_matches('/'));
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(Error::io(parent))?;
        }
        fs::write(&destination, &***contents).map_err(Error::io(&destination))?;
        progress.inc(1);
        Ok::<_, Error>(())
    })?;

    progress.finish_and_clear();

    let summary = BuildSummary {
        written: output.len(),
        removed,
    };
    info!(
        event = "output.saved",
        elapsed = %format!("{:.1}s", start.elapsed().as_secs_f32()),
        dir = %dir.display(),
        written = summary.written,
        removed = summary.removed,
    );
    Ok(summary)
}

fn check_outside_sources(dir: &Path, sources: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    let dir = dir.canonicalize().map_err(Error::io(dir))?;
    let sources = sources.canonicalize().map_err(Error::io(sources))?;
    if sources.starts_with(&dir) {
        return Err(Error::OutputContainsSources {
            output: dir,
            sources,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::test_util::portfolio;

    #[test]
    fn test_build_writes_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("projects/old/slides/1")).unwrap();
        fs::write(dir.path().join("projects/old/slides/1/index.html"), "stale").unwrap();
        fs::write(dir.path().join("stale.txt"), "stale").unwrap();

        let sources = tempfile::tempdir().unwrap();
        let portfolio = portfolio();
        let output = portfolio.output().unwrap();
        let summary = build(Instant::now(), dir.path(), sources.path(), &output).unwrap();

        assert_eq!(summary.written, output.len());
        assert_eq!(summary.removed, 2);
        assert!(!dir.path().join("stale.txt").exists());
        assert!(!dir.path().join("projects/old").exists());
        assert!(dir.path().join("index.html").is_file());
        assert!(dir.path().join("projects/p1/slides/3/index.html").is_file());
        assert!(dir.path().join("robots.txt").is_file());

        // A second build over its own output removes nothing.
        let summary = build(Instant::now(), dir.path(), sources.path(), &output).unwrap();
        assert_eq!(summary.removed, 0);
    }

    #[test]
    fn test_build_keeps_sources() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("site");
        fs::create_dir_all(sources.join("projects")).unwrap();
        fs::write(sources.join("showcase.toml"), "title = \"Mine\"").unwrap();
        fs::write(sources.join("projects/a.toml"), "id = \"a\"").unwrap();

        let portfolio = portfolio();
        let output = portfolio.output().unwrap();
        for target in [sources.clone(), dir.path().to_owned()] {
            let error = build(Instant::now(), &target, &sources, &output).unwrap_err();
            assert!(matches!(error, Error::OutputContainsSources { .. }), "{error}");
        }
        assert!(sources.join("showcase.toml").is_file());
        assert!(sources.join("projects/a.toml").is_file());
        assert!(!sources.join("index.html").exists());

        // A sibling directory is fine.
        let summary = build(Instant::now(), &dir.path().join("out"), &sources, &output).unwrap();
        assert_eq!(summary.written, output.len());
        assert!(sources.join("showcase.toml").is_file());
    }
}
