//! Host-side composition
//!
//! [`Generator`] ties the pieces together the way an editing session uses
//! them: gate the active record, format it, render it, count it.

use tracing::{debug, warn};

use crate::batch::{BatchItem, render_batch};
use crate::error::{RenderError, StatsError};
use crate::formatter::FormatOptions;
use crate::models::{Content, ContentType, RenderConfig};
use crate::payload::active_payload;
use crate::render::{ImageHandle, ImageRenderer};
use crate::stats::{StatsStore, UsageStats};

/// A payload produced for the active record
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Type of the record that was formatted
    pub content_type: ContentType,
    /// Exact string encoded in the image
    pub payload: String,
    /// Rendered image, or the render failure
    pub image: Result<ImageHandle, RenderError>,
    /// Suggested download name, `qr-code-<type>.png`
    pub file_name: String,
}

/// Download name for a single generated image
pub fn download_file_name(content_type: ContentType) -> String {
    format!("qr-code-{content_type}.png")
}

/// Renderer, settings and usage counters for one session
pub struct Generator<R, S> {
    renderer: R,
    stats: UsageStats<S>,
    render_config: RenderConfig,
    batch_config: RenderConfig,
    options: FormatOptions,
}

impl<R: ImageRenderer, S: StatsStore> Generator<R, S> {
    /// Generator with default render, batch and format settings
    pub fn new(renderer: R, stats: UsageStats<S>) -> Self {
        Self {
            renderer,
            stats,
            render_config: RenderConfig::default(),
            batch_config: RenderConfig::batch(),
            options: FormatOptions::default(),
        }
    }

    /// Replace the interactive render settings
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    /// Replace the settings used for every batch image
    pub fn with_batch_config(mut self, config: RenderConfig) -> Self {
        self.batch_config = config;
        self
    }

    /// Replace the format options (event reference zone)
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Change render settings mid-session
    pub fn set_render_config(&mut self, config: RenderConfig) {
        self.render_config = config;
    }

    /// Current interactive render settings
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Current format options
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format, render and count the active record
    ///
    /// Returns `None` when the record is absent (below its minimum fields,
    /// or an event with unparseable times). A present record is counted
    /// even if rendering fails.
    pub fn generate(&mut self, content: &Content) -> Option<Generated> {
        let content_type = content.content_type();
        let payload = active_payload(content, &self.options)?;
        let image = self.renderer.render(&payload, &self.render_config);
        if let Err(err) = &image {
            debug!(%content_type, "render failed: {err}");
        }
        if let Err(err) = self.stats.record(content_type) {
            warn!(%content_type, "failed to save usage stats: {err}");
        }

        Some(Generated {
            content_type,
            payload,
            image,
            file_name: download_file_name(content_type),
        })
    }

    /// Render each non-blank line of `block` as-is; not counted in stats
    pub fn generate_batch(&self, block: &str) -> Vec<BatchItem> {
        render_batch(&self.renderer, block, &self.batch_config)
    }

    /// Usage counters for this session
    pub fn stats(&self) -> &UsageStats<S> {
        &self.stats
    }

    /// Zero the usage counters and clear the store
    pub fn reset_stats(&mut self) -> Result<(), StatsError> {
        self.stats.reset()
    }

    /// The composed renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, Event, Wifi};
    use crate::render::ChartRenderer;
    use crate::stats::MemoryStore;

    fn generator() -> Generator<ChartRenderer, MemoryStore> {
        let stats = UsageStats::open(MemoryStore::new()).unwrap();
        Generator::new(ChartRenderer::default(), stats)
    }

    #[test]
    fn test_generate_counts_present_records() {
        let mut generator = generator();
        let wifi = Content::Wifi(Wifi {
            ssid: "Home".into(),
            password: "pw".into(),
            ..Default::default()
        });

        let generated = generator.generate(&wifi).unwrap();
        assert_eq!(generated.content_type, ContentType::Wifi);
        assert_eq!(generated.payload, "WIFI:T:WPA;S:Home;P:pw;H:false;;");
        assert_eq!(generated.file_name, "qr-code-wifi.png");
        assert!(matches!(generated.image, Ok(ImageHandle::Remote { .. })));
        assert_eq!(generator.stats().count(ContentType::Wifi), 1);
    }

    #[test]
    fn test_absent_records_not_counted() {
        let mut generator = generator();
        assert!(generator.generate(&Content::empty(ContentType::Contact)).is_none());

        let bad_event = Content::Event(Event {
            title: "X".into(),
            start: "not-a-date".into(),
            end: "2024-01-01T11:00".into(),
            description: String::new(),
        });
        assert!(generator.generate(&bad_event).is_none());
        assert_eq!(generator.stats().total(), 0);

        let phone_only = Content::Contact(Contact {
            phone: "555".into(),
            ..Default::default()
        });
        assert!(generator.generate(&phone_only).is_some());
        assert_eq!(generator.stats().total(), 1);
    }

    #[test]
    fn test_render_config_forwarded() {
        let config = RenderConfig::new(
            480,
            "#112233".parse().unwrap(),
            "#ffffff".parse().unwrap(),
            crate::models::ECLevel::H,
        )
        .unwrap();
        let mut generator = generator().with_render_config(config);
        let url = Content::Url(crate::models::UrlContent {
            url: "example.com".into(),
        });
        let generated = generator.generate(&url).unwrap();
        match generated.image {
            Ok(ImageHandle::Remote { url }) => assert!(url.contains("chs=480x480")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_batch_skips_stats() {
        let generator = generator();
        let items = generator.generate_batch("one\ntwo\n\nthree");
        assert_eq!(items.len(), 3);
        assert_eq!(generator.stats().total(), 0);
    }

    #[test]
    fn test_reset_stats() {
        let mut generator = generator();
        generator.generate(&Content::Text(crate::models::TextContent {
            text: "hello".into(),
        }));
        assert_eq!(generator.stats().total(), 1);
        generator.reset_stats().unwrap();
        assert_eq!(generator.stats().total(), 0);
    }
}
