use indicatif::{ProgressBar, ProgressStyle};
use std::{fs, io, path::Path, time::Instant};

/// Removes directories under `path` that contain no files, leaving `path` itself.
pub fn recursively_remove_empty_dirs_of_contents<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fn recursively_remove_empty_dirs<P: AsRef<Path>>(path: P) -> io::Result<bool> {
        let mut keep = false;
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                keep |= recursively_remove_empty_dirs(path)?;
            } else {
                keep = true;
            }
        }
        if !keep {
            fs::remove_dir(&path)?;
        }
        Ok(keep)
    }

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            recursively_remove_empty_dirs(path)?;
        }
    }
    Ok(())
}

// TODO: wait for `slice_concat_ext` stabilization.
pub fn join<T: Clone>(slice: &[T], sep: &T) -> Vec<T> {
    let mut iter = slice.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(slice.len() * 2 - 1);
    result.push(first.clone());

    for v in iter {
        result.push(sep.clone());
        result.push(v.clone());
    }
    result
}

pub fn progress_bar(name: &str, count: usize, start: Instant) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{msg} {wide_bar} {pos}/{len} {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(count as u64)
        .with_message(name.to_owned())
        .with_style(style)
        .with_elapsed(start.elapsed())
}
