use crate::registry::GlyphRegistry;
use crate::search::AssetLocations;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// The sprite script embeds all symbols in one quoted string literal. There is
// one alternative per quote, so the closing quote matches the opening one.
static SVG_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    // expect OK: the pattern is a constant known to compile.
    Regex::new(r#"(?s)'<svg>(.+?)</svg>'|"<svg>(.+?)</svg>"|`<svg>(.+?)</svg>`"#)
        .expect("svg literal pattern")
});

static SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<symbol.+?id="([^"]+)".+?>(.+?)</symbol>"#).expect("symbol pattern")
});

static ICON_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.([a-zA-Z0-9_-]+)::?before\s*\{\s*content:\s*['"]?(\\[a-fA-F0-9]+)['"]?;?\s*\}"#)
        .expect("icon rule pattern")
});

/// Extracts `(symbol id, inner markup)` pairs from a generated sprite script.
///
/// A script without an `<svg>` literal yields nothing.
/// Only the first literal is looked at.
pub fn parse_sprite(text: &str) -> Vec<(&str, &str)> {
    let Some(svg) = SVG_LITERAL
        .captures(text)
        .and_then(|c| c.iter().skip(1).flatten().next())
    else {
        return Vec::new();
    };

    SYMBOL
        .captures_iter(svg.as_str())
        .filter_map(|captures| {
            let id = captures.get(1)?.as_str();
            let markup = captures.get(2)?.as_str();

            (!id.is_empty() && !markup.is_empty()).then_some((id, markup))
        })
        .collect()
}

/// Extracts `(class name, codepoint)` pairs from a generated stylesheet.
///
/// Codepoints come without their backslash, e.g. `("icon-home", "e600")`.
pub fn parse_stylesheet(text: &str) -> Vec<(&str, &str)> {
    ICON_RULE
        .captures_iter(text)
        .filter_map(|captures| {
            let class = captures.get(1)?.as_str();
            let codepoint = captures.get(2)?.as_str().strip_prefix('\\')?;

            (!codepoint.is_empty()).then_some((class, codepoint))
        })
        .collect()
}

/// Adds all glyphs of a sprite script to the registry, returning how many were found.
pub fn load_sprite(registry: &mut GlyphRegistry, text: &str) -> usize {
    let symbols = parse_sprite(text);

    for (id, markup) in &symbols {
        registry.add_glyph(id, markup);
    }

    symbols.len()
}

/// Adds the class mappings of a stylesheet to the registry.
///
/// Must run after [load_sprite]: classes without a glyph are skipped and
/// returned, in stylesheet order.
pub fn load_stylesheet(registry: &mut GlyphRegistry, text: &str) -> Vec<String> {
    let mut dangling = Vec::new();

    for (class, codepoint) in parse_stylesheet(text) {
        if let Err(_e) = registry.add_class(class, codepoint) {
            #[cfg(feature = "log")]
            log::warn!("skipping stylesheet rule: {_e}");

            dangling.push(class.to_owned());
        }
    }

    dangling
}

/// Reads asset files.
///
/// [FsReader] reads from disk; hosts that know about unsaved buffers can pass
/// a closure instead.
pub trait AssetReader {
    fn read(&self, path: &Path) -> std::io::Result<String>;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct FsReader;

impl AssetReader for FsReader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<F> AssetReader for F
where
    F: Fn(&Path) -> std::io::Result<String>,
{
    fn read(&self, path: &Path) -> std::io::Result<String> {
        self(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a reload found, for the host to show to the user.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub glyphs: usize,
    pub classes: usize,
    /// Stylesheet classes that name no glyph of the sprite.
    pub dangling: Vec<String>,
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.errors.is_empty()
    }
}

/// Rebuilds the registry from the sprite and stylesheet.
///
/// The registry is cleared first. Missing files are fine and simply leave their
/// part of the registry empty; unreadable files are treated the same way, but
/// end up in [LoadReport::errors].
pub fn load<R>(registry: &mut GlyphRegistry, locations: &AssetLocations, reader: &R) -> LoadReport
where
    R: AssetReader + ?Sized,
{
    let mut report = LoadReport::default();

    registry.clear();

    // glyphs first: stylesheet entries are checked against them
    if let Some(text) = locations
        .sprite
        .as_ref()
        .and_then(|sprite| read_asset(reader, &sprite.path, &mut report))
    {
        load_sprite(registry, &text);
    }

    if let Some(text) = locations
        .stylesheet
        .as_ref()
        .and_then(|stylesheet| read_asset(reader, &stylesheet.path, &mut report))
    {
        report.dangling = load_stylesheet(registry, &text);
    }

    report.glyphs = registry.glyph_count();
    report.classes = registry.class_count();

    #[cfg(feature = "log")]
    log::debug!(
        "loaded {} glyphs and {} icon classes ({} dangling)",
        report.glyphs,
        report.classes,
        report.dangling.len()
    );

    report
}

fn read_asset<R>(reader: &R, path: &Path, report: &mut LoadReport) -> Option<String>
where
    R: AssetReader + ?Sized,
{
    match reader.read(path) {
        Ok(text) => Some(text),
        Err(source) => {
            #[cfg(feature = "log")]
            log::warn!("could not read icon font asset {path:?}: {source}");

            report.errors.push(LoadError::Read {
                path: path.to_owned(),
                source,
            });

            None
        }
    }
}

#[cfg(test)]
mod test {
    use crate::asset::{AssetFile, AssetKind};
    use crate::parse::{LoadError, load, load_sprite, load_stylesheet, parse_sprite, parse_stylesheet};
    use crate::registry::GlyphRegistry;
    use crate::search::AssetLocations;
    use std::error::Error;
    use std::io;
    use std::path::{Path, PathBuf};

    static SPRITE: &str = include_str!("../resources/iconfont.js");
    static STYLESHEET: &str = include_str!("../resources/iconfont.css");

    fn locations() -> AssetLocations {
        AssetLocations {
            sprite: Some(AssetFile {
                path: PathBuf::from("/p/iconfont.js"),
                kind: AssetKind::Sprite,
            }),
            stylesheet: Some(AssetFile {
                path: PathBuf::from("/p/iconfont.css"),
                kind: AssetKind::Stylesheet,
            }),
        }
    }

    fn fixtures(path: &Path) -> io::Result<String> {
        match path.file_name().and_then(|n| n.to_str()) {
            Some("iconfont.js") => Ok(SPRITE.to_owned()),
            Some("iconfont.css") => Ok(STYLESHEET.to_owned()),
            _ => Err(io::ErrorKind::NotFound.into()),
        }
    }

    #[test]
    fn test_parse_example_sprite() {
        let symbols = parse_sprite(SPRITE);

        let ids = symbols.iter().map(|(id, _)| *id).collect::<Vec<_>>();
        assert_eq!(ids, vec!["home", "icon-user", "search", "1.5-arrow"]);

        let (_, markup) = symbols[0];
        assert!(markup.starts_with("<path d=\"M512 128"));
        assert!(markup.ends_with("</path>"));
    }

    #[test]
    fn test_sprite_without_svg() {
        assert!(parse_sprite("window.foo = 1;").is_empty());
        // unquoted svg isn't the generator's shape
        assert!(parse_sprite("<svg><symbol id=\"a\" x><path/></symbol></svg>").is_empty());
        assert!(parse_sprite("").is_empty());
        // quotes have to pair up
        assert!(parse_sprite("s='<svg><symbol id=\"a\" x><path/></symbol></svg>\";").is_empty());
    }

    #[test]
    fn test_template_literal_sprite() {
        let text = "window.s = `<svg>\n<symbol id=\"a\" viewBox=\"0 0 1 1\">\n<path/>\n</symbol>\n</svg>`;";

        assert_eq!(parse_sprite(text), vec![("a", "\n<path/>\n")]);
    }

    #[test]
    fn test_malformed_symbols_skipped() {
        let text = r#"var s='<svg><symbol viewBox="0 0 1 1"><path/></symbol><symbol id="ok" viewBox="0 0 1 1"><path/></symbol><symbol id="empty" v></symbol></svg>';"#;

        let symbols = parse_sprite(text);
        // the id-less symbol is swallowed into the match for `ok`
        assert_eq!(symbols, vec![("ok", "<path/>")]);
    }

    #[test]
    fn test_parse_example_stylesheet() {
        let rules = parse_stylesheet(STYLESHEET);

        assert_eq!(
            rules,
            vec![
                ("icon-home", "e600"),
                ("icon-user", "e601"),
                ("icon-search", "E602"),
                ("icon-missing", "e603"),
            ]
        );
    }

    #[test]
    fn test_stylesheet_variations() {
        let text = ".a::before{content:'\\e001'}\n.b:before {\n  content: \\e002;\n}\n.c::after { content: \"\\e003\"; }";

        assert_eq!(parse_stylesheet(text), vec![("a", "e001"), ("b", "e002")]);
    }

    #[test]
    fn test_bare_class_finds_prefixed_glyph() {
        let mut registry = GlyphRegistry::default();
        load_sprite(&mut registry, SPRITE);

        let dangling = load_stylesheet(&mut registry, ".user::before { content: \"\\e601\"; }");

        assert!(dangling.is_empty());
        assert_eq!(registry.class_for_codepoint("e601"), Some("user"));
        assert_eq!(registry.resolve_glyph("user").map(|g| g.id.as_str()), Some("icon-user"));
    }

    #[test]
    fn test_load_fixtures() {
        let mut registry = GlyphRegistry::default();
        let report = load(&mut registry, &locations(), &fixtures);

        assert_eq!(report.glyphs, 4);
        assert_eq!(report.classes, 3);
        assert_eq!(report.dangling, vec!["icon-missing".to_string()]);
        assert!(report.errors.is_empty());

        assert_eq!(registry.codepoint("icon-home"), Some("e600"));
        assert_eq!(registry.class_for_codepoint("e600"), Some("icon-home"));
        assert_eq!(registry.class_for_codepoint("e602"), Some("icon-search"));
        assert_eq!(registry.codepoint("icon-missing"), None);
        assert_eq!(registry.class_for_codepoint("e603"), None);
        assert!(registry.resolve_glyph("icon-home").is_some());
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut first = GlyphRegistry::default();
        load(&mut first, &locations(), &fixtures);

        let mut second = first.clone();
        load(&mut second, &locations(), &fixtures);

        assert_eq!(first, second);
    }

    #[test]
    fn test_stylesheet_before_sprite_adds_nothing() {
        let mut registry = GlyphRegistry::default();

        let dangling = load_stylesheet(&mut registry, STYLESHEET);
        assert_eq!(dangling.len(), 4);
        assert_eq!(registry.class_count(), 0);

        load_sprite(&mut registry, SPRITE);
        assert_eq!(registry.class_count(), 0);
        assert!(!registry.is_usable());
    }

    #[test]
    fn test_missing_stylesheet_keeps_sprite() {
        let mut registry = GlyphRegistry::default();
        let mut locations = locations();
        locations.stylesheet = None;

        let report = load(&mut registry, &locations, &fixtures);

        assert!(report.is_clean());
        assert_eq!(report.glyphs, 4);
        assert_eq!(report.classes, 0);
    }

    #[test]
    fn test_read_error_is_reported() -> Result<(), Box<dyn Error>> {
        let mut registry = GlyphRegistry::default();
        load(&mut registry, &locations(), &fixtures);

        let denied = |path: &Path| -> io::Result<String> {
            if path.ends_with("iconfont.js") {
                Err(io::ErrorKind::PermissionDenied.into())
            } else {
                fixtures(path)
            }
        };
        let report = load(&mut registry, &locations(), &denied);

        // the old glyphs are gone, and without glyphs no class is accepted
        assert_eq!(registry.glyph_count(), 0);
        assert_eq!(registry.class_count(), 0);
        assert_eq!(report.errors.len(), 1);

        let LoadError::Read { path, source } = &report.errors[0];
        assert_eq!(path, Path::new("/p/iconfont.js"));
        assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);

        Ok(())
    }
}
