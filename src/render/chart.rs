use super::{ImageHandle, ImageRenderer, ensure_payload};
use crate::error::RenderError;
use crate::formatter::escape::encode_component;
use crate::models::RenderConfig;

/// Default remote chart endpoint
pub const DEFAULT_CHART_URL: &str = "https://chart.googleapis.com/chart";

/// Renderer that hands the payload to a remote image service
///
/// Only the size is forwarded; the service picks its own colors and
/// error correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRenderer {
    base_url: String,
}

impl ChartRenderer {
    /// Renderer pointing at `base_url`, e.g. [`DEFAULT_CHART_URL`]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Endpoint in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Image URL for a payload, without the blank check
    pub fn chart_url(&self, payload: &str, size: u32) -> String {
        format!(
            "{}?chs={size}x{size}&cht=qr&chl={}&choe=UTF-8",
            self.base_url,
            encode_component(payload)
        )
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_URL)
    }
}

impl ImageRenderer for ChartRenderer {
    fn render(&self, payload: &str, config: &RenderConfig) -> Result<ImageHandle, RenderError> {
        ensure_payload(payload)?;
        Ok(ImageHandle::Remote {
            url: self.chart_url(payload, config.size),
        })
    }
}
