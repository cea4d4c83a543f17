//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod text;

use anyhow::{anyhow, Result};
use argdoc::ParsedDoc;

/// Trait for rendering one parsed docstring.
pub trait Renderer {
    /// `source` names where the docstring came from (`-` for stdin).
    fn render(&self, source: &str, doc: &ParsedDoc) -> String;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, plain: bool) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer { plain })),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text or json", format)),
    }
}
