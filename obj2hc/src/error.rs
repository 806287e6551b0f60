use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// input couldn't be read or the header couldn't be written
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// malformed `v`/`l`/`f` record; `line` is 1-based
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// an index that doesn't land inside the table it points into
    #[error("{context}: index {index} out of range (table has {len} entries)")]
    Generation {
        context: String,
        index: usize,
        len: usize,
    },

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }
}
