use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, warn};

use super::{ImageHandle, ImageRenderer, QrEncoder, ensure_payload};
use crate::error::RenderError;
use crate::models::RenderConfig;

/// Renderer backed by an encoder that is loaded on first use
///
/// The loader runs at most once. Whatever it returns, encoder or failure,
/// is kept for the lifetime of the renderer.
pub struct LazyRenderer<F> {
    loader: F,
    encoder: OnceLock<Result<Box<dyn QrEncoder>, String>>,
}

impl<F> LazyRenderer<F>
where
    F: Fn() -> Result<Box<dyn QrEncoder>, String> + Send + Sync,
{
    /// Renderer that will call `loader` on its first render
    pub fn new(loader: F) -> Self {
        Self {
            loader,
            encoder: OnceLock::new(),
        }
    }

    /// Whether the loader has run yet
    pub fn is_loaded(&self) -> bool {
        self.encoder.get().is_some()
    }

    fn encoder(&self) -> Result<&dyn QrEncoder, RenderError> {
        let loaded = self.encoder.get_or_init(|| {
            debug!("loading QR encoder");
            let result = (self.loader)();
            if let Err(reason) = &result {
                warn!("QR encoder failed to load: {reason}");
            }
            result
        });
        match loaded {
            Ok(encoder) => Ok(encoder.as_ref()),
            Err(reason) => Err(RenderError::Unavailable(reason.clone())),
        }
    }
}

impl<F> ImageRenderer for LazyRenderer<F>
where
    F: Fn() -> Result<Box<dyn QrEncoder>, String> + Send + Sync,
{
    fn render(&self, payload: &str, config: &RenderConfig) -> Result<ImageHandle, RenderError> {
        ensure_payload(payload)?;
        let image = self.encoder()?.encode(payload, config)?;
        Ok(ImageHandle::Raster(image))
    }
}

impl<F> fmt::Debug for LazyRenderer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyRenderer")
            .field("loaded", &self.encoder.get().map(|r| r.is_ok()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn solid_encoder(payload: &str, config: &RenderConfig) -> Result<RgbaImage, RenderError> {
        if payload.len() > 64 {
            return Err(RenderError::Encoder("payload too long".into()));
        }
        Ok(RgbaImage::from_pixel(
            config.size,
            config.size,
            Rgba(config.background.to_rgba()),
        ))
    }

    #[test]
    fn test_loads_once() {
        let loads = AtomicUsize::new(0);
        let renderer = LazyRenderer::new(|| {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(solid_encoder) as Box<dyn QrEncoder>)
        });
        assert!(!renderer.is_loaded());

        let config = RenderConfig::default();
        for _ in 0..3 {
            match renderer.render("hello", &config).unwrap() {
                ImageHandle::Raster(img) => assert_eq!(img.dimensions(), (300, 300)),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(renderer.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_load_failure_is_cached() {
        let loads = AtomicUsize::new(0);
        let renderer = LazyRenderer::new(|| {
            loads.fetch_add(1, Ordering::SeqCst);
            Err::<Box<dyn QrEncoder>, _>("script blocked".to_string())
        });
        let config = RenderConfig::default();
        for _ in 0..2 {
            assert_eq!(
                renderer.render("hello", &config),
                Err(RenderError::Unavailable("script blocked".into()))
            );
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blank_payload_skips_loading() {
        let renderer = LazyRenderer::new(|| Ok(Box::new(solid_encoder) as Box<dyn QrEncoder>));
        assert_eq!(
            renderer.render("  \n", &RenderConfig::default()),
            Err(RenderError::EmptyPayload)
        );
        assert!(!renderer.is_loaded());
    }

    #[test]
    fn test_encoder_error_passes_through() {
        let renderer = LazyRenderer::new(|| Ok(Box::new(solid_encoder) as Box<dyn QrEncoder>));
        let long = "x".repeat(65);
        assert!(matches!(
            renderer.render(&long, &RenderConfig::default()),
            Err(RenderError::Encoder(_))
        ));
    }
}
