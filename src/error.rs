use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while opening the root or descending into the tree.
#[derive(Error, Debug)]
pub enum FindError {
    #[error("cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "symbolic link loop at {} (points back to {})",
        path.display(),
        ancestor.display()
    )]
    SymlinkLoop { path: PathBuf, ancestor: PathBuf },
}

impl FindError {
    pub fn access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }

    /// The path the traversal was working on when it failed.
    pub fn path(&self) -> &Path {
        match self {
            FindError::Access { path, .. } => path,
            FindError::SymlinkLoop { path, .. } => path,
        }
    }
}

impl From<walkdir::Error> for FindError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();

        if let Some(ancestor) = err.loop_ancestor() {
            return FindError::SymlinkLoop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("directory traversal failed"));
        FindError::Access { path, source }
    }
}

pub type FindResult<T> = Result<T, FindError>;
