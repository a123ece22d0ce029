//! Batch mode
//!
//! A newline-delimited block becomes one image per non-blank line. Lines are
//! used verbatim as payloads; none of the formatters run here.

use rayon::prelude::*;
use tracing::debug;

use crate::error::RenderError;
use crate::models::RenderConfig;
use crate::render::{ImageHandle, ImageRenderer};

/// One rendered line of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Zero-based position among the non-blank lines
    pub index: usize,
    /// The line, untouched
    pub payload: String,
    /// Suggested download name, `qr-batch-<n>.png` counting from 1
    pub file_name: String,
    /// Rendered image, or why this line failed
    pub image: Result<ImageHandle, RenderError>,
}

/// Non-blank lines of a batch block, in order
///
/// Splits on `\n` and `\r\n`. Lines that are empty after trimming are
/// dropped; the rest keep their surrounding whitespace.
pub fn batch_lines(block: &str) -> Vec<&str> {
    block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Download name for the `index`-th batch image
pub fn batch_file_name(index: usize) -> String {
    format!("qr-batch-{}.png", index + 1)
}

/// Render every non-blank line of `block`, in parallel, preserving order
pub fn render_batch<R>(renderer: &R, block: &str, config: &RenderConfig) -> Vec<BatchItem>
where
    R: ImageRenderer + ?Sized,
{
    let lines = batch_lines(block);
    debug!(lines = lines.len(), "rendering batch");

    lines
        .par_iter()
        .enumerate()
        .map(|(index, line)| BatchItem {
            index,
            payload: line.to_string(),
            file_name: batch_file_name(index),
            image: renderer.render(line, config),
        })
        .collect()
}
