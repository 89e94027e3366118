//! Recursive search for text files (`.txt` / `.text`, any case) beneath a
//! directory, following symbolic links.
//!
//! ```no_run
//! use std::path::Path;
//!
//! for file in text_file_finder::find("text/simple")? {
//!     println!("{}", file?.display());
//! }
//! assert!(!text_file_finder::is_text(Path::new("text/simple/dir.txt")));
//! # Ok::<(), text_file_finder::FindError>(())
//! ```

pub mod config;
pub mod error;
pub mod predicate;
pub mod scanner;

pub use error::{FindError, FindResult};
pub use predicate::{Extensions, has_text_extension, is_text};
pub use scanner::{Finder, TextFiles, find, list};
