use crate::config::Prefixes;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A single icon's vector artwork, as found in the sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// The sprite symbol's id, e.g. `home`.
    pub id: String,
    /// Inner content of the `<symbol>`; never parsed, only embedded.
    pub markup: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("icon class `{0}` has no glyph in the sprite")]
    UnknownGlyph(String),
}

/// Everything known about the icon font: glyph artwork from the sprite, and
/// the class names and codepoints from the stylesheet.
///
/// The registry is filled in two passes, glyphs first, then class mappings,
/// because a class mapping is only accepted when its glyph is already known.
/// It is never merged into: a reload starts from [GlyphRegistry::clear].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRegistry {
    prefixes: Prefixes,
    glyphs: HashMap<String, Glyph>,
    // class name -> codepoint, in stylesheet order
    classes: IndexMap<String, String>,
    // codepoint -> class name
    codepoints: HashMap<String, String>,
}

impl GlyphRegistry {
    pub fn new(prefixes: Prefixes) -> Self {
        Self {
            prefixes,
            glyphs: HashMap::new(),
            classes: IndexMap::new(),
            codepoints: HashMap::new(),
        }
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.classes.clear();
        self.codepoints.clear();
    }

    /// Registers a glyph, replacing any earlier glyph with the same id.
    pub fn add_glyph(&mut self, id: &str, markup: &str) {
        let glyph = Glyph {
            id: id.to_owned(),
            markup: markup.trim().to_owned(),
        };

        self.glyphs.insert(glyph.id.clone(), glyph);
    }

    /// Maps an icon class to a codepoint, if the class belongs to a known glyph.
    ///
    /// A class seen again gets its codepoint replaced. A codepoint seen again
    /// points back to the class registered last.
    pub fn add_class(&mut self, class: &str, codepoint: &str) -> Result<(), MappingError> {
        if self.resolve_glyph(class).is_none() {
            return Err(MappingError::UnknownGlyph(class.to_owned()));
        }

        let codepoint = codepoint.to_ascii_lowercase();

        if let Some(previous) = self.classes.insert(class.to_owned(), codepoint.clone()) {
            // the old codepoint shouldn't lead back to this class anymore
            let points_here = self.codepoints.get(&previous).map(String::as_str) == Some(class);

            if previous != codepoint && points_here {
                self.codepoints.remove(&previous);
            }
        }
        self.codepoints.insert(codepoint, class.to_owned());

        Ok(())
    }

    /// Finds the glyph a name refers to, with or without a prefix.
    ///
    /// The prefix-stripped name is tried first, so `icon-home` finds glyph
    /// `home` even when a symbol called `icon-home` also exists. A name without
    /// any prefix then gets each prefix added in turn, so `user` finds the
    /// symbol `icon-user`.
    pub fn resolve_glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs
            .get(self.prefixes.strip(name))
            .or_else(|| self.glyphs.get(name))
            .or_else(|| {
                if self.prefixes.has_prefix(name) {
                    return None;
                }

                self.prefixes
                    .prefixes
                    .iter()
                    .find_map(|prefix| self.glyphs.get(&format!("{prefix}{name}")))
            })
    }

    pub fn markup(&self, name: &str) -> Option<&str> {
        self.resolve_glyph(name).map(|glyph| glyph.markup.as_str())
    }

    pub fn codepoint(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// Looks up the class registered for a codepoint, case-insensitively.
    pub fn class_for_codepoint(&self, codepoint: &str) -> Option<&str> {
        self.codepoints
            .get(&codepoint.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// All class names with their codepoints, in stylesheet order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.classes
            .iter()
            .map(|(class, codepoint)| (class.as_str(), codepoint.as_str()))
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    /// Glyphs that have artwork and at least one codepoint.
    pub fn usable_glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values().filter(|glyph| {
            self.classes
                .keys()
                .any(|class| self.resolve_glyph(class).map(|g| &g.id) == Some(&glyph.id))
        })
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Whether there is anything a scan could find.
    pub fn is_usable(&self) -> bool {
        !self.glyphs.is_empty() && !self.classes.is_empty()
    }
}

impl Default for GlyphRegistry {
    fn default() -> Self {
        Self::new(Prefixes::default())
    }
}

#[cfg(test)]
mod test {
    use crate::registry::{GlyphRegistry, MappingError};

    #[test]
    fn test_class_requires_glyph() {
        let mut registry = GlyphRegistry::default();
        registry.add_glyph("home", "  <path d=\"M0 0\"/>\n");

        assert_eq!(registry.markup("home"), Some("<path d=\"M0 0\"/>"));
        assert!(!registry.is_usable());

        assert_eq!(
            registry.add_class("icon-missing", "e601"),
            Err(MappingError::UnknownGlyph("icon-missing".into()))
        );
        assert_eq!(registry.class_count(), 0);
        assert_eq!(registry.class_for_codepoint("e601"), None);

        registry.add_class("icon-home", "E600").unwrap();
        assert_eq!(registry.codepoint("icon-home"), Some("e600"));
        assert_eq!(registry.class_for_codepoint("e600"), Some("icon-home"));
        assert_eq!(registry.class_for_codepoint("E600"), Some("icon-home"));
        assert!(registry.is_usable());
    }

    #[test]
    fn test_prefix_insensitive_lookup() {
        let mut registry = GlyphRegistry::default();
        registry.add_glyph("home", "<path/>");
        registry.add_glyph("icon-user", "<circle/>");

        assert_eq!(registry.resolve_glyph("icon-home").map(|g| g.id.as_str()), Some("home"));
        assert_eq!(registry.resolve_glyph("1.5-home").map(|g| g.id.as_str()), Some("home"));
        // the raw name is the fallback when stripping finds nothing
        assert_eq!(
            registry.resolve_glyph("icon-user").map(|g| g.id.as_str()),
            Some("icon-user")
        );
        // and a bare name finds the prefixed symbol
        assert_eq!(
            registry.resolve_glyph("user").map(|g| g.id.as_str()),
            Some("icon-user")
        );
        assert!(registry.resolve_glyph("icon-nope").is_none());
        // a name that already has a prefix never gets another one
        assert!(registry.resolve_glyph("1-user").is_none());
    }

    #[test]
    fn test_unprefixed_class_maps_to_prefixed_glyph() {
        let mut registry = GlyphRegistry::default();
        registry.add_glyph("icon-user", "<circle/>");

        registry.add_class("user", "E601").unwrap();
        assert_eq!(registry.class_for_codepoint("e601"), Some("user"));
        assert_eq!(registry.markup("user"), Some("<circle/>"));
        assert!(registry.is_usable());
    }

    #[test]
    fn test_last_wins() {
        let mut registry = GlyphRegistry::default();
        registry.add_glyph("home", "<old/>");
        registry.add_glyph("home", "<new/>");
        assert_eq!(registry.markup("home"), Some("<new/>"));
        assert_eq!(registry.glyph_count(), 1);

        registry.add_class("icon-home", "e600").unwrap();
        registry.add_class("1-home", "e600").unwrap();
        // shared codepoint: the class registered last is the one found
        assert_eq!(registry.class_for_codepoint("e600"), Some("1-home"));

        registry.add_class("icon-home", "e610").unwrap();
        assert_eq!(registry.codepoint("icon-home"), Some("e610"));
        assert_eq!(registry.class_for_codepoint("e610"), Some("icon-home"));
        assert_eq!(registry.class_for_codepoint("e600"), Some("1-home"));
    }

    #[test]
    fn test_usable_glyphs() {
        let mut registry = GlyphRegistry::default();
        registry.add_glyph("home", "<path/>");
        registry.add_glyph("orphan", "<path/>");
        registry.add_class("icon-home", "e600").unwrap();

        let usable = registry.usable_glyphs().map(|g| g.id.as_str()).collect::<Vec<_>>();
        assert_eq!(usable, vec!["home"]);
        assert_eq!(registry.glyph_count(), 2);

        registry.clear();
        assert_eq!(registry.glyph_count(), 0);
        assert_eq!(registry.class_count(), 0);
        assert_eq!(registry.class_for_codepoint("e600"), None);
    }
}
