//! SVG rasterization to PNG.
//!
//! A [`RenderEngine`] paints markup onto a `tiny_skia` pixmap; the
//! [`Rasterizer`] allocates the surface, runs the engine off the async
//! executor and encodes the result with the `image` PNG encoder.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use resvg::tiny_skia::{Pixmap, Transform};
use thiserror::Error;

use super::find_root;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Rasterization failures. No partial output accompanies any of them.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate a {width}x{height} drawing surface")]
    SurfaceInitFailed { width: u32, height: u32 },

    #[error("render failed: {0}")]
    RenderFailed(String),

    #[error("PNG encoding failed: {0}")]
    EncodeFailed(String),
}

/// Paints SVG markup onto a drawing surface.
pub trait RenderEngine: Send + Sync {
    /// Render `markup` to fill `surface`. The error is the engine's message.
    fn render(&self, markup: &str, surface: &mut Pixmap) -> Result<(), String>;
}

/// Built-in engine: `usvg` parsing and `resvg` painting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgEngine;

impl RenderEngine for ResvgEngine {
    #[allow(clippy::cast_precision_loss)]
    fn render(&self, markup: &str, surface: &mut Pixmap) -> Result<(), String> {
        let markup = with_svg_namespace(markup);
        let tree = usvg::Tree::from_str(&markup, &usvg::Options::default())
            .map_err(|err| err.to_string())?;

        // Stretch the document's size onto the surface
        let size = tree.size();
        let scale_x = surface.width() as f32 / size.width();
        let scale_y = surface.height() as f32 / size.height();

        resvg::render(
            &tree,
            Transform::from_scale(scale_x, scale_y),
            &mut surface.as_mut(),
        );
        Ok(())
    }
}

/// Declare the SVG namespace on an unprefixed `<svg>` root that lacks one.
///
/// usvg only accepts roots in the SVG namespace; hand-written snippets
/// often omit it.
fn with_svg_namespace(markup: &str) -> Cow<'_, str> {
    let Some(root) = find_root(markup) else {
        return Cow::Borrowed(markup);
    };
    if root.tag.name().as_ref() != b"svg" || root.attr("xmlns").is_some() {
        return Cow::Borrowed(markup);
    }

    let insert_at = root.start + "<svg".len();
    Cow::Owned(format!(
        "{} xmlns=\"{SVG_NAMESPACE}\"{}",
        &markup[..insert_at],
        &markup[insert_at..]
    ))
}

/// Async rasterizer around a [`RenderEngine`].
#[derive(Clone)]
pub struct Rasterizer {
    engine: Arc<dyn RenderEngine>,
    timeout: Option<Duration>,
}

impl Rasterizer {
    pub fn new(engine: impl RenderEngine + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
            timeout: None,
        }
    }

    /// Give up on a render that takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render `markup` at exactly `width × height` pixels and encode as PNG.
    ///
    /// The blocking work runs on the blocking thread pool; the caller is
    /// suspended until it settles or the timeout elapses.
    pub async fn rasterize(
        &self,
        markup: String,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let engine = Arc::clone(&self.engine);
        let task = tokio::task::spawn_blocking(move || {
            rasterize_blocking(engine.as_ref(), &markup, width, height)
        });

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
                RenderError::RenderFailed(format!(
                    "render timed out after {}ms",
                    limit.as_millis()
                ))
            })?,
            None => task.await,
        };

        joined.map_err(|err| RenderError::RenderFailed(format!("render task failed: {err}")))?
    }
}

/// Allocate, paint and encode on the current thread.
pub fn rasterize_blocking(
    engine: &dyn RenderEngine,
    markup: &str,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, RenderError> {
    let mut surface =
        Pixmap::new(width, height).ok_or(RenderError::SurfaceInitFailed { width, height })?;

    engine
        .render(markup, &mut surface)
        .map_err(RenderError::RenderFailed)?;

    encode_png(&surface)
}

/// Encode a pixmap as RGBA8 PNG.
fn encode_png(surface: &Pixmap) -> Result<Vec<u8>, RenderError> {
    // tiny-skia stores premultiplied alpha; PNG wants straight alpha
    let mut rgba = Vec::with_capacity(surface.data().len());
    for pixel in surface.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            &rgba,
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|err| RenderError::EncodeFailed(err.to_string()))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4" viewBox="0 0 4 4"><rect width="4" height="4" fill="#ff0000"/></svg>"##;

    struct SlowEngine(Duration);

    impl RenderEngine for SlowEngine {
        fn render(&self, _markup: &str, _surface: &mut Pixmap) -> Result<(), String> {
            std::thread::sleep(self.0);
            Ok(())
        }
    }

    #[test]
    fn test_render_exact_size() {
        let png = rasterize_blocking(&ResvgEngine, RED_SQUARE, 16, 8).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(8, 4).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_background() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"></svg>"#;
        let png = rasterize_blocking(&ResvgEngine, svg, 2, 2).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_zero_surface() {
        let err = rasterize_blocking(&ResvgEngine, RED_SQUARE, 0, 10).unwrap_err();
        assert!(matches!(
            err,
            RenderError::SurfaceInitFailed {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn test_malformed_markup() {
        let err = rasterize_blocking(&ResvgEngine, "<svg><g></svg>", 4, 4).unwrap_err();
        assert!(matches!(err, RenderError::RenderFailed(_)));
        let err = rasterize_blocking(&ResvgEngine, "", 4, 4).unwrap_err();
        assert!(matches!(err, RenderError::RenderFailed(_)));
    }

    #[test]
    fn test_missing_namespace_is_declared() {
        assert_eq!(
            with_svg_namespace(r#"<svg viewBox="0 0 1 1"/>"#),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"/>"#
        );
        assert_eq!(with_svg_namespace(RED_SQUARE), RED_SQUARE);
        assert_eq!(with_svg_namespace("text"), "text");

        let svg = r##"<svg width="2" height="2"><rect width="2" height="2" fill="#00ff00"/></svg>"##;
        let png = rasterize_blocking(&ResvgEngine, svg, 2, 2).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.get_pixel(1, 1).0, [0, 255, 0, 255]);
    }

    #[tokio::test]
    async fn test_rasterize_async() {
        let rasterizer = Rasterizer::new(ResvgEngine);
        let png = rasterizer.rasterize(RED_SQUARE.to_string(), 3, 3).await.unwrap();
        assert_eq!(
            image::load_from_memory(&png).unwrap().dimensions(),
            (3, 3)
        );
    }

    #[tokio::test]
    async fn test_rasterize_timeout() {
        let rasterizer = Rasterizer::new(SlowEngine(Duration::from_millis(500)))
            .with_timeout(Some(Duration::from_millis(20)));
        let err = rasterizer
            .rasterize(RED_SQUARE.to_string(), 2, 2)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
