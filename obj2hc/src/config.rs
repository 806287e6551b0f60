use crate::error::{Error, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// What gets baked into the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Mode {
    /// Every `l` record as a pair of points (default)
    #[default]
    Line,
    /// Every `f` record as three points
    Face,
    /// One edge list per `o` group
    Obj,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    /// base for the guard, the array names and `<name>.HC`
    pub name: String,
    pub mode: Mode,
    pub out_dir: PathBuf,
}

impl Config {
    pub fn new(input: PathBuf, name: String, mode: Mode, out_dir: PathBuf) -> Result<Self> {
        check_symbol(&name)?;
        Ok(Config {
            input,
            name,
            mode,
            out_dir,
        })
    }
}

// the name ends up spliced into identifiers and a filename, so it has to be a
// plain C identifier
pub fn check_symbol(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Usage(format!(
            "`{name}` is not a valid symbol name (expected [A-Za-z_][A-Za-z0-9_]*)"
        )))
    }
}
