use std::time::Duration;

/// The prefixes icon names may carry in source code and stylesheets.
///
/// A sprite symbol `home` is usually referenced as `icon-home`; some generators
/// also emit stroke-width variants like `1-home` or `1.5-home`.
/// Stripping a prefix is what connects a class or prop name back to its glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixes {
    pub prefixes: Vec<String>,
}

impl Prefixes {
    /// Removes the first matching prefix from `name`.
    ///
    /// Returns `name` unchanged if it carries none of the prefixes.
    pub fn strip<'a>(&self, name: &'a str) -> &'a str {
        self.prefixes
            .iter()
            .find_map(|prefix| name.strip_prefix(prefix.as_str()))
            .unwrap_or(name)
    }

    pub fn has_prefix(&self, name: &str) -> bool {
        self.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Add more prefixes to this list.
    pub fn append<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }
}

impl<I, S> From<I> for Prefixes
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(value: I) -> Self {
        let prefixes = value.into_iter().map(Into::into).collect();

        Prefixes { prefixes }
    }
}

impl Default for Prefixes {
    fn default() -> Self {
        ["icon-", "1-", "1.5-"].into()
    }
}

/// Which family of syntaxes a document is scanned for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LanguageKind {
    /// Stylesheets: class selectors paired with a `content:` rule.
    Style,
    /// Markup and scripts: `name="icon-..."` props and `&#x...;` entities.
    Code,
}

/// How a glyph is drawn into an image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Width and height of the produced image, in pixels.
    pub size: u32,
    /// Side of the square `viewBox` glyph markup is drawn in.
    /// Iconfont generators draw on a 1024 unit grid.
    pub view_box: u32,
    pub background: String,
    pub stroke: String,
    pub stroke_width: u32,
    /// Glyph scale inside the viewport; the glyph stays centered.
    pub scale: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            size: 16,
            view_box: 1024,
            background: "rgba(255, 255, 255, 0.5)".into(),
            stroke: "#000000".into(),
            stroke_width: 5,
            scale: 1.0,
        }
    }
}

/// Everything the host may tune.
///
/// The defaults match what iconfont.cn style generators produce, so most hosts
/// can use `Config::default()` as-is.
///
/// # Example
///
/// ```
/// use iconfont_lens::{Config, LanguageKind};
///
/// let config = Config::default().with_code_languages(["vue", "svelte"]);
///
/// assert_eq!(config.language_kind("vue"), Some(LanguageKind::Code));
/// assert_eq!(config.language_kind("scss"), Some(LanguageKind::Style));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub prefixes: Prefixes,
    pub style_languages: Vec<String>,
    pub code_languages: Vec<String>,
    /// How many lines after a selector line may hold its `content:` rule.
    pub look_ahead: usize,
    /// Quiet period before an edited document is scanned again.
    pub debounce: Duration,
    pub render: RenderStyle,
    pub sprite_file_name: String,
    pub stylesheet_file_name: String,
    /// Directory names never descended into when looking for assets.
    pub excluded_dirs: Vec<String>,
}

impl Config {
    pub fn language_kind(&self, language_id: &str) -> Option<LanguageKind> {
        if self.style_languages.iter().any(|l| l == language_id) {
            Some(LanguageKind::Style)
        } else if self.code_languages.iter().any(|l| l == language_id) {
            Some(LanguageKind::Code)
        } else {
            None
        }
    }

    pub fn with_prefixes(mut self, prefixes: impl Into<Prefixes>) -> Self {
        self.prefixes = prefixes.into();
        self
    }

    /// Treat more language ids as stylesheets.
    pub fn with_style_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_languages
            .extend(languages.into_iter().map(Into::into));
        self
    }

    /// Treat more language ids as code.
    pub fn with_code_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code_languages
            .extend(languages.into_iter().map(Into::into));
        self
    }

    pub fn with_look_ahead(mut self, look_ahead: usize) -> Self {
        self.look_ahead = look_ahead;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_render_style(mut self, render: RenderStyle) -> Self {
        self.render = render;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        let strings = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();

        Self {
            prefixes: Prefixes::default(),
            style_languages: strings(&["css", "scss", "sass", "less", "stylus"]),
            code_languages: strings(&[
                "typescript",
                "typescriptreact",
                "javascript",
                "javascriptreact",
                "html",
            ]),
            look_ahead: 5,
            debounce: Duration::from_millis(500),
            render: RenderStyle::default(),
            sprite_file_name: "iconfont.js".into(),
            stylesheet_file_name: "iconfont.css".into(),
            excluded_dirs: strings(&["node_modules"]),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::{Config, LanguageKind, Prefixes};

    #[test]
    fn test_strip_prefixes() {
        let prefixes = Prefixes::default();

        assert_eq!(prefixes.strip("icon-home"), "home");
        assert_eq!(prefixes.strip("1-home"), "home");
        assert_eq!(prefixes.strip("1.5-home"), "home");
        assert_eq!(prefixes.strip("home"), "home");
        // only one prefix is ever removed
        assert_eq!(prefixes.strip("icon-icon-home"), "icon-home");

        assert!(prefixes.has_prefix("1.5-arrow"));
        assert!(!prefixes.has_prefix("arrow"));
    }

    #[test]
    fn test_custom_prefixes() {
        let prefixes = Prefixes::from(["if-"]).append(["ico_"]);

        assert_eq!(prefixes.strip("if-home"), "home");
        assert_eq!(prefixes.strip("ico_home"), "home");
        assert_eq!(prefixes.strip("icon-home"), "icon-home");
    }

    #[test]
    fn test_language_kinds() {
        let config = Config::default();

        assert_eq!(config.language_kind("less"), Some(LanguageKind::Style));
        assert_eq!(
            config.language_kind("typescriptreact"),
            Some(LanguageKind::Code)
        );
        assert_eq!(config.language_kind("rust"), None);

        let config = config.with_style_languages(["postcss"]);
        assert_eq!(config.language_kind("postcss"), Some(LanguageKind::Style));
    }
}
