use crate::error::{FindError, FindResult};
use crate::predicate::Extensions;
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configurable recursive search for text files beneath a root.
#[derive(Debug, Clone)]
pub struct Finder {
    root: PathBuf,
    extensions: Extensions,
    max_depth: Option<usize>,
    follow_links: bool,
    sort: bool,
}

impl Finder {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: Extensions::default(),
            max_depth: None,
            follow_links: true,
            sort: false,
        }
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Depth 0 is the root itself. `None` means unbounded.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Sort directory entries by file name so results come out in a stable order.
    pub fn sort(mut self, yes: bool) -> Self {
        self.sort = yes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Opens the root and returns a lazy iterator over matching paths.
    ///
    /// Fails immediately if the root cannot be accessed. Errors met during
    /// descent are yielded as items; the iterator stops after the first one.
    pub fn find(self) -> FindResult<TextFiles> {
        let meta = if self.follow_links {
            fs::metadata(&self.root)
        } else {
            fs::symlink_metadata(&self.root)
        };
        meta.map_err(|e| FindError::access(&self.root, e))?;

        let mut walker = WalkDir::new(&self.root).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }
        if self.sort {
            walker = walker.sort_by_file_name();
        }

        debug!(root = %self.root.display(), "starting text file search");

        Ok(TextFiles {
            walker: walker.into_iter(),
            extensions: self.extensions,
            done: false,
        })
    }

    /// Drains [`Finder::find`] into a list.
    pub fn list(self) -> FindResult<Vec<PathBuf>> {
        self.find()?.collect()
    }
}

/// Single-pass iterator over text files. Open directory handles belong to
/// the iterator and are closed when it finishes or is dropped.
pub struct TextFiles {
    walker: walkdir::IntoIter,
    extensions: Extensions,
    done: bool,
}

impl Iterator for TextFiles {
    type Item = FindResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) if is_unreadable_link(&err) => {
                    debug!("skipping link with unreadable target: {}", err);
                    continue;
                }
                Err(err) => {
                    self.done = true;
                    let err = FindError::from(err);
                    warn!("{}", err);
                    return Some(Err(err));
                }
            };

            if entry.file_type().is_dir() {
                debug!(dir = %entry.path().display(), depth = entry.depth(), "descending");
                continue;
            }

            if self.extensions.is_match_file(&entry) {
                debug!(file = %entry.path().display(), "matched");
                return Some(Ok(entry.into_path()));
            }
        }
    }
}

impl FusedIterator for TextFiles {}

// A link whose target is missing or itself loops (ELOOP) is visited as a
// plain link: never a text file, never descended.
fn is_unreadable_link(err: &walkdir::Error) -> bool {
    let Some(path) = err.path() else {
        return false;
    };
    err.loop_ancestor().is_none()
        && fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Lazily finds `.txt`/`.text` files beneath `start`, following symbolic links.
pub fn find<P: AsRef<Path>>(start: P) -> FindResult<TextFiles> {
    Finder::new(start).find()
}

/// Same as [`find`], collected into a list.
pub fn list<P: AsRef<Path>>(start: P) -> FindResult<Vec<PathBuf>> {
    find(start)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("top.txt"), "a").unwrap();
        fs::write(root.join("skip.html"), "b").unwrap();
        fs::write(root.join("nested/mid.TEXT"), "c").unwrap();
        fs::write(root.join("nested/deeper/bottom.txt"), "d").unwrap();
        temp
    }

    #[test]
    fn test_list_matches_find_count() {
        let temp = tree();
        let listed = list(temp.path()).unwrap();
        let counted = find(temp.path()).unwrap().count();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.len(), counted);
    }

    #[test]
    fn test_find_is_lazy_and_fused() {
        let temp = tree();
        let mut files = find(temp.path()).unwrap();
        assert!(files.next().is_some());
        let rest: Vec<_> = files.by_ref().collect();
        assert_eq!(rest.len(), 2);
        assert!(files.next().is_none());
    }

    #[test]
    fn test_root_file_is_reported() {
        let temp = tree();
        let file = temp.path().join("top.txt");
        assert_eq!(list(&file).unwrap(), vec![file.clone()]);

        let other = temp.path().join("skip.html");
        assert!(list(&other).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_access_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nowhere");
        match find(&missing) {
            Err(FindError::Access { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an access error"),
        }
    }

    #[test]
    fn test_max_depth() {
        let temp = tree();
        let shallow = Finder::new(temp.path()).max_depth(Some(1)).list().unwrap();
        assert_eq!(shallow, vec![temp.path().join("top.txt")]);

        let two = Finder::new(temp.path()).max_depth(Some(2)).list().unwrap();
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn test_sorted_order() {
        let temp = tree();
        let files = Finder::new(temp.path()).sort(true).list().unwrap();
        assert_eq!(
            files,
            vec![
                temp.path().join("nested/deeper/bottom.txt"),
                temp.path().join("nested/mid.TEXT"),
                temp.path().join("top.txt"),
            ]
        );
    }

    #[test]
    fn test_custom_extensions() {
        let temp = tree();
        let found: HashSet<_> = Finder::new(temp.path())
            .extensions(Extensions::new(["html"]))
            .list()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(found, HashSet::from([temp.path().join("skip.html")]));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_reported() {
        let temp = tree();
        std::os::unix::fs::symlink(temp.path(), temp.path().join("nested/back")).unwrap();

        let results: Vec<_> = find(temp.path()).unwrap().collect();
        let last = results.last().unwrap();
        assert!(matches!(last, Err(FindError::SymlinkLoop { .. })));
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_is_skipped() {
        let temp = tree();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("broken.txt"))
            .unwrap();
        assert_eq!(list(temp.path()).unwrap().len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_self_referencing_links_are_skipped() {
        use std::os::unix::fs::symlink;

        let temp = tree();
        symlink(temp.path().join("self.txt"), temp.path().join("self.txt")).unwrap();
        symlink(temp.path().join("pong.txt"), temp.path().join("ping.txt")).unwrap();
        symlink(temp.path().join("ping.txt"), temp.path().join("pong.txt")).unwrap();

        let found: HashSet<_> = list(temp.path()).unwrap().into_iter().collect();
        assert_eq!(
            found,
            HashSet::from([
                temp.path().join("top.txt"),
                temp.path().join("nested/mid.TEXT"),
                temp.path().join("nested/deeper/bottom.txt"),
            ])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_no_follow_skips_linked_dirs() {
        let temp = tree();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("far.txt"), "e").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        assert_eq!(list(temp.path()).unwrap().len(), 4);
        let unfollowed = Finder::new(temp.path()).follow_links(false).list().unwrap();
        assert_eq!(unfollowed.len(), 3);
    }
}
