use crate::config::RenderStyle;
use crate::registry::GlyphRegistry;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;

/// A glyph drawn into a standalone SVG image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphImage {
    /// Id of the glyph that was drawn.
    pub glyph: String,
    pub svg: String,
    /// `data:image/svg+xml;base64,...`, usable wherever an image URI is.
    pub data_uri: String,
}

/// Draws the glyph `name` refers to, with or without its prefix.
///
/// Returns `None` when the registry has no artwork for the name, which simply
/// means there is nothing to draw.
/// The output only depends on the name, the registry and the style, so it can
/// be cached by name until either of the latter changes.
pub fn render_glyph(name: &str, registry: &GlyphRegistry, style: &RenderStyle) -> Option<GlyphImage> {
    let Some(glyph) = registry.resolve_glyph(name) else {
        #[cfg(feature = "log")]
        log::debug!("no artwork for icon `{name}`");

        return None;
    };

    let RenderStyle {
        size,
        view_box,
        background,
        stroke,
        stroke_width,
        scale,
    } = style;

    // keep the scaled glyph centered
    let translation = f64::from(*view_box) * (1.0 - f64::from(*scale)) / 2.0;

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {view_box} {view_box}" width="{size}" height="{size}">"#,
            r#"<rect x="0" y="0" width="{view_box}" height="{view_box}" fill="{background}" stroke="{stroke}" stroke-width="{stroke_width}" />"#,
            r#"<g transform="translate({translation}, {translation}) scale({scale})">{markup}</g>"#,
            "</svg>"
        ),
        view_box = view_box,
        size = size,
        background = background,
        stroke = stroke,
        stroke_width = stroke_width,
        translation = translation,
        scale = scale,
        markup = glyph.markup,
    );

    let data_uri = format!("data:image/svg+xml;base64,{}", STANDARD.encode(&svg));

    Some(GlyphImage {
        glyph: glyph.id.clone(),
        svg,
        data_uri,
    })
}

/// Images rendered so far, by the name they were asked for.
///
/// Must be cleared whenever the registry is reloaded or the style changes.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    images: HashMap<String, GlyphImage>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_render(
        &mut self,
        name: &str,
        registry: &GlyphRegistry,
        style: &RenderStyle,
    ) -> Option<&GlyphImage> {
        if !self.images.contains_key(name) {
            let image = render_glyph(name, registry, style)?;
            self.images.insert(name.to_owned(), image);
        }

        self.images.get(name)
    }

    pub fn get(&self, name: &str) -> Option<&GlyphImage> {
        self.images.get(name)
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
