// the only two places the pipeline touches the filesystem

use crate::error::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads the whole file up front; `\r\n` endings are stripped like `\n`.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Writes `text` to `<dir>/<name>.HC`, replacing any previous header.
///
/// The text goes to a temp file next to the target first and is renamed over
/// it, so readers never see a half-written header.
pub fn write_header(dir: &Path, name: &str, text: &str) -> Result<PathBuf> {
    let target = dir.join(format!("{name}.HC"));
    let file_error = |source: io::Error| Error::File {
        path: target.clone(),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(file_error)?;
    tmp.write_all(text.as_bytes()).map_err(file_error)?;
    tmp.flush().map_err(file_error)?;
    tmp.persist(&target).map_err(|e| file_error(e.error))?;
    Ok(target)
}
