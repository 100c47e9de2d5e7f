//! Copy and convert actions on a found icon.
//!
//! These are the pieces behind the host's hover links and context menu
//! commands; the host puts the strings on the clipboard or applies the edits.

use crate::registry::GlyphRegistry;
use crate::scan::{Occurrence, Position, Range, SourceForm, byte_index, column_at, is_name_char};

/// `&#xe600;`
pub fn html_entity(codepoint: &str) -> String {
    format!("&#x{codepoint};")
}

/// `\e600`, as written in a stylesheet's `content:` rule.
pub fn css_escape(codepoint: &str) -> String {
    format!("\\{codepoint}")
}

/// `<Icon name="icon-home" />`
pub fn component(name: &str) -> String {
    format!("<Icon name=\"{name}\" />")
}

/// Everything a hover shows about an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDetails {
    pub name: String,
    pub glyph: String,
    pub codepoint: Option<String>,
    pub entity: Option<String>,
    pub css_escape: Option<String>,
    pub component: String,
    /// How the icon would be written without the component, if known:
    /// the entity for name props, the source text otherwise.
    pub original: String,
}

impl IconDetails {
    pub fn describe(occurrence: &Occurrence, registry: &GlyphRegistry) -> Self {
        let codepoint = occurrence
            .codepoint
            .clone()
            .or_else(|| registry.codepoint(&occurrence.name).map(Into::into));
        let entity = codepoint.as_deref().map(html_entity);

        let original = match (occurrence.form, &entity) {
            (SourceForm::NameProp, Some(entity)) => entity.clone(),
            _ => occurrence.raw.clone(),
        };

        Self {
            name: occurrence.name.clone(),
            glyph: occurrence.glyph.clone(),
            css_escape: codepoint.as_deref().map(css_escape),
            codepoint,
            entity,
            component: component(&occurrence.name),
            original,
        }
    }
}

/// The text to copy for "copy icon name".
pub fn copy_name(occurrence: &Occurrence) -> &str {
    &occurrence.name
}

/// The text to copy for "copy icon code": the icon as an HTML entity.
///
/// `None` when the icon's codepoint is unknown.
pub fn copy_entity(occurrence: &Occurrence) -> Option<String> {
    occurrence.codepoint.as_deref().map(html_entity)
}

/// A replacement of one range of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// Turns an entity into a `name` prop.
///
/// When the entity is the whole value of a `code` attribute, as in
/// `<Icon code="&#xe600;" />`, the attribute is replaced: `<Icon name="icon-home" />`.
/// Otherwise just the entity is.
///
/// `line` is the current text of the occurrence's line; `None` is returned for
/// anything but an entity, or when the line no longer holds the entity.
pub fn entity_to_name_prop(line: &str, occurrence: &Occurrence) -> Option<TextEdit> {
    if occurrence.form != SourceForm::HtmlEntity {
        return None;
    }

    let Range { start, end } = occurrence.range;
    let start_index = byte_index(line, start.column)?;
    let end_index = byte_index(line, end.column)?;
    if line.get(start_index..end_index)? != occurrence.raw {
        return None;
    }

    let before = &line[..start_index];
    let after = &line[end_index..];

    let mut range = occurrence.range;

    // `code="` right before the entity and the same quote right after it;
    // `data-code=` or `barcode=` are other attributes
    let attribute = before.rfind("code=").and_then(|attr_start| {
        if before[..attr_start].chars().next_back().is_some_and(is_name_char) {
            return None;
        }

        let quote = before[attr_start + "code=".len()..].trim_start();
        let closes = match quote {
            "\"" => after.starts_with('"'),
            "'" => after.starts_with('\''),
            _ => false,
        };

        closes.then_some(attr_start)
    });

    if let Some(attr_start) = attribute {
        range.start = Position::new(start.line, column_at(line, attr_start));
        range.end = Position::new(end.line, end.column + 1);
    }

    Some(TextEdit {
        range,
        new_text: format!("name=\"{}\"", occurrence.name),
    })
}

/// Replaces an entity with an `<Icon />` component.
pub fn entity_to_component(occurrence: &Occurrence) -> Option<TextEdit> {
    if occurrence.form != SourceForm::HtmlEntity {
        return None;
    }

    Some(TextEdit {
        range: occurrence.range,
        new_text: component(&occurrence.name),
    })
}
