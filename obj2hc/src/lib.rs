//! Bakes Wavefront OBJ geometry into a static HolyC header.
//!
//! The whole crate is one pipeline, see [`run`]:
//! [`files::load_lines`] → [`objparse::parse`] → [`emit::emit`] →
//! [`files::write_header`].

pub mod config;
pub mod emit;
pub mod error;
pub mod files;
pub mod objparse;

pub use config::{Config, Mode};
pub use error::{Error, Result};

use std::path::PathBuf;

/// Runs the whole conversion and returns the path of the written header.
pub fn run(config: &Config) -> Result<PathBuf> {
    let lines = files::load_lines(&config.input)?;
    log::info!("read {} lines from {}", lines.len(), config.input.display());

    let model = objparse::parse(&lines, config.mode)?;
    log::info!(
        "parsed {} vertices, {} edges, {} triangles, {} parts",
        model.vertices.len(),
        model.edges.len(),
        model.triangles.len(),
        model.parts.len()
    );
    match config.mode {
        Mode::Line if model.edges.is_empty() => log::warn!("no `l` records, header will be empty"),
        Mode::Face if model.triangles.is_empty() => {
            log::warn!("no `f` records, header will be empty")
        }
        Mode::Obj if model.parts.is_empty() => log::warn!("no `o` groups, header will be empty"),
        Mode::Obj => {
            for part in model.parts.iter().filter(|p| p.edges.is_empty()) {
                log::warn!("part `{}` has no edges", part.name);
            }
        }
        _ => {}
    }

    let text = emit::emit(&model, config.mode, &config.name)?;
    let path = files::write_header(&config.out_dir, &config.name, &text)?;
    log::info!("wrote {} bytes to {}", text.len(), path.display());
    Ok(path)
}
