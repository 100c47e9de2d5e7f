use crate::config::{Config, LanguageKind};
use crate::registry::GlyphRegistry;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    // expect OK: the pattern is a constant known to compile.
    Regex::new(r"&#x([a-fA-F0-9]+);").expect("html entity pattern")
});

// group 1 includes the quotes, which is the span shown to the user
static CONTENT_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"content:\s*("\\?[a-fA-F0-9]+"|'\\?[a-fA-F0-9]+')"#)
        .expect("content escape pattern")
});

const CONTENT_RULE: &str = "content:";

/// A place in a document.
///
/// Lines are 0-based. Columns count UTF-16 code units from the start of the
/// line, the unit editors use for cursor positions and decoration ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }

    /// Whether `position` lies in this range, both ends included.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

/// How an icon was referenced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SourceForm {
    /// A `content: "\e600"` escape in a rule whose selector names the icon class.
    CssContent {
        /// The line the selector was found on.
        rule_line: usize,
    },
    /// An HTML numeric character reference like `&#xe600;`.
    HtmlEntity,
    /// A component prop like `name="icon-home"`.
    NameProp,
}

/// One reference to an icon found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// The name the icon is known by in code, e.g. `icon-home`.
    pub name: String,
    /// Id of the sprite glyph the name resolves to, e.g. `home`.
    pub glyph: String,
    pub codepoint: Option<String>,
    pub range: Range,
    /// The text covered by `range`.
    pub raw: String,
    pub form: SourceForm,
}

impl Occurrence {
    pub fn line(&self) -> usize {
        self.range.start.line
    }
}

/// Finds icon references in document text.
///
/// Stylesheets are searched for icon class selectors followed by a `content:`
/// rule; code is searched for `name="..."` props and `&#x...;` entities.
/// Every scan starts over from the text: nothing is carried between scans.
#[derive(Debug, Clone)]
pub struct Scanner {
    look_ahead: usize,
    // `None` when no prefixes are configured: then no prop names an icon
    name_prop: Option<Regex>,
}

impl Scanner {
    /// Builds the matchers for the configured prefixes.
    pub fn new(config: &Config) -> Result<Self, regex::Error> {
        let prefixes = config
            .prefixes
            .prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .map(|prefix| regex::escape(prefix))
            .collect::<Vec<_>>();

        // `name="icon-x"`, `name='icon-x'`, `name={"icon-x"}`, `name={'icon-x'}`
        let name_prop = if prefixes.is_empty() {
            None
        } else {
            let prefixes = prefixes.join("|");
            Some(Regex::new(&format!(
                r#"name=\{{?["']((?:{prefixes})[a-zA-Z0-9_-]+)["']"#
            ))?)
        };

        Ok(Self {
            look_ahead: config.look_ahead,
            name_prop,
        })
    }

    pub fn scan(&self, text: &str, kind: LanguageKind, registry: &GlyphRegistry) -> Vec<Occurrence> {
        if !registry.is_usable() {
            return Vec::new();
        }

        let lines = text.lines().collect::<Vec<_>>();

        match kind {
            LanguageKind::Style => self.scan_style(&lines, registry),
            LanguageKind::Code => self.scan_code(&lines, registry),
        }
    }

    fn scan_style(&self, lines: &[&str], registry: &GlyphRegistry) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        let mut claimed = HashSet::new();

        for (rule_line, text) in lines.iter().enumerate() {
            for (class, codepoint) in registry.classes() {
                if !contains_class(text, class) {
                    continue;
                }

                // the selector line itself counts, for one-line rules
                let window_end = rule_line.saturating_add(self.look_ahead).min(lines.len() - 1);
                let Some(content_line) =
                    (rule_line..=window_end).find(|&line| lines[line].contains(CONTENT_RULE))
                else {
                    continue;
                };

                // first come, first served
                if !claimed.insert(content_line) {
                    continue;
                }

                let content_text = lines[content_line];
                let Some(escape) = CONTENT_ESCAPE
                    .captures(content_text)
                    .and_then(|captures| captures.get(1))
                else {
                    #[cfg(feature = "log")]
                    log::debug!("no content escape for `{class}` on line {content_line}");

                    continue;
                };

                let Some(glyph) = registry.resolve_glyph(class) else {
                    continue;
                };

                occurrences.push(Occurrence {
                    name: class.to_owned(),
                    glyph: glyph.id.clone(),
                    codepoint: Some(codepoint.to_owned()),
                    range: span(content_line, content_text, escape),
                    raw: escape.as_str().to_owned(),
                    form: SourceForm::CssContent { rule_line },
                });
            }
        }

        occurrences
    }

    fn scan_code(&self, lines: &[&str], registry: &GlyphRegistry) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        let mut seen = HashSet::new();

        for (line, text) in lines.iter().enumerate() {
            for id in self
                .name_prop
                .iter()
                .flat_map(|name_prop| name_prop.captures_iter(text))
                .filter_map(|captures| captures.get(1))
            {
                let range = span(line, text, id);
                let name = id.as_str();

                let Some(glyph) = registry.resolve_glyph(name) else {
                    continue;
                };

                if !seen.insert(range) {
                    continue;
                }

                occurrences.push(Occurrence {
                    name: name.to_owned(),
                    glyph: glyph.id.clone(),
                    codepoint: registry.codepoint(name).map(Into::into),
                    range,
                    raw: name.to_owned(),
                    form: SourceForm::NameProp,
                });
            }

            for captures in HTML_ENTITY.captures_iter(text) {
                let (Some(entity), Some(hex)) = (captures.get(0), captures.get(1)) else {
                    continue;
                };
                let range = span(line, text, entity);

                let Some(class) = registry.class_for_codepoint(hex.as_str()) else {
                    #[cfg(feature = "log")]
                    log::debug!("no icon class for entity {}", entity.as_str());

                    continue;
                };

                let Some(glyph) = registry.resolve_glyph(class) else {
                    continue;
                };

                if !seen.insert(range) {
                    continue;
                }

                occurrences.push(Occurrence {
                    name: class.to_owned(),
                    glyph: glyph.id.clone(),
                    codepoint: Some(hex.as_str().to_ascii_lowercase()),
                    range,
                    raw: entity.as_str().to_owned(),
                    form: SourceForm::HtmlEntity,
                });
            }
        }

        occurrences
    }
}

/// The range of a match on line `line`, whose text is `text`.
fn span(line: usize, text: &str, found: regex::Match<'_>) -> Range {
    Range::on_line(line, column_at(text, found.start()), column_at(text, found.end()))
}

/// The column of byte offset `index` of `line`.
///
/// `index` must lie on a char boundary.
pub(crate) fn column_at(line: &str, index: usize) -> usize {
    line[..index].encode_utf16().count()
}

/// The byte offset of `column` in `line`, or `None` when the column is past
/// the end of the line or splits a character.
pub(crate) fn byte_index(line: &str, column: usize) -> Option<usize> {
    let mut units = 0;

    for (index, c) in line.char_indices() {
        if units == column {
            return Some(index);
        }
        if units > column {
            return None;
        }
        units += c.len_utf16();
    }

    (units == column).then_some(line.len())
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Whether `class` appears in `text` as a whole name, so that `icon-home`
/// isn't found in `.icon-home-filled`.
fn contains_class(text: &str, class: &str) -> bool {
    text.match_indices(class).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + class.len()..].chars().next();

        !before.is_some_and(is_name_char) && !after.is_some_and(is_name_char)
    })
}
