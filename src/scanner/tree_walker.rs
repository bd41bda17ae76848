use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Depth-first walk over every regular file below a root directory.
///
/// Directories are descended, regular files are yielded. Anything else
/// (symbolic links, sockets, devices) and any unreadable entry ends the walk
/// with an error; after the first error the iterator is exhausted.
pub struct TreeWalker {
    inner: walkdir::IntoIter,
    finished: bool,
}

impl TreeWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let inner = WalkDir::new(root.as_ref())
            .follow_links(false)
            .into_iter();

        Self {
            inner,
            finished: false,
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(ExtractError::Walk(err)));
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            if file_type.is_file() {
                return Some(Ok(entry.into_path()));
            }

            self.finished = true;
            return Some(Err(ExtractError::UnsupportedEntry {
                path: entry.into_path(),
            }));
        }
    }
}
