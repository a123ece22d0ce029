use tracing::warn;

use super::{ImageHandle, ImageRenderer};
use crate::error::RenderError;
use crate::models::RenderConfig;

/// Tries `primary`, and renders with `fallback` when it fails
#[derive(Debug, Clone)]
pub struct FallbackRenderer<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ImageRenderer, F: ImageRenderer> FallbackRenderer<P, F> {
    /// Compose two renderers, `primary` first
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Renderer tried first
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Renderer used when the primary fails
    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<P: ImageRenderer, F: ImageRenderer> ImageRenderer for FallbackRenderer<P, F> {
    fn render(&self, payload: &str, config: &RenderConfig) -> Result<ImageHandle, RenderError> {
        match self.primary.render(payload, config) {
            Ok(handle) => Ok(handle),
            // nothing to draw is nothing to draw, whichever renderer
            Err(RenderError::EmptyPayload) => Err(RenderError::EmptyPayload),
            Err(err) => {
                warn!("primary renderer failed, using fallback: {err}");
                self.fallback.render(payload, config)
            }
        }
    }
}
