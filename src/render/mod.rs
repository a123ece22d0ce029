//! Image rendering capability
//!
//! The crate never draws modules itself. An [`ImageRenderer`] turns a payload
//! plus a [`RenderConfig`] into an [`ImageHandle`], and the host picks which
//! implementation to compose:
//! - [`LazyRenderer`]: loads an external [`QrEncoder`] on first use
//! - [`ChartRenderer`]: points at a remote image service
//! - [`FallbackRenderer`]: tries one, falls back to the other

use image::RgbaImage;

use crate::error::RenderError;
use crate::models::RenderConfig;

/// Remote chart-service renderer
pub mod chart;
/// Primary/secondary composition
pub mod fallback;
/// Lazily loaded encoder
pub mod lazy;

pub use chart::ChartRenderer;
pub use fallback::FallbackRenderer;
pub use lazy::LazyRenderer;

/// Result of rendering a payload
#[derive(Debug, Clone, PartialEq)]
pub enum ImageHandle {
    /// Pixels produced by a local encoder
    Raster(RgbaImage),
    /// Image served by a remote service
    Remote {
        /// Fully built image URL
        url: String,
    },
}

/// Turns a payload string into a displayable image
pub trait ImageRenderer: Send + Sync {
    /// Draw `payload` with `config`; blank payloads are an error
    fn render(&self, payload: &str, config: &RenderConfig) -> Result<ImageHandle, RenderError>;
}

impl<R: ImageRenderer + ?Sized> ImageRenderer for Box<R> {
    fn render(&self, payload: &str, config: &RenderConfig) -> Result<ImageHandle, RenderError> {
        (**self).render(payload, config)
    }
}

impl<R: ImageRenderer + ?Sized> ImageRenderer for &R {
    fn render(&self, payload: &str, config: &RenderConfig) -> Result<ImageHandle, RenderError> {
        (**self).render(payload, config)
    }
}

/// External 2-D barcode encoder
pub trait QrEncoder: Send + Sync {
    /// Encode `payload` into a square raster
    fn encode(&self, payload: &str, config: &RenderConfig) -> Result<RgbaImage, RenderError>;
}

impl<F> QrEncoder for F
where
    F: Fn(&str, &RenderConfig) -> Result<RgbaImage, RenderError> + Send + Sync,
{
    fn encode(&self, payload: &str, config: &RenderConfig) -> Result<RgbaImage, RenderError> {
        self(payload, config)
    }
}

/// Reject whitespace-only payloads before any encoder sees them
pub(crate) fn ensure_payload(payload: &str) -> Result<(), RenderError> {
    if payload.trim().is_empty() {
        return Err(RenderError::EmptyPayload);
    }
    Ok(())
}
