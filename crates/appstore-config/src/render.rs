//! Entry rendering
//!
//! One `key: "value"` line per non-empty field in declared order, tags as
//! an inline list. Values are inserted verbatim; embedded quotes are not
//! escaped.

use crate::field::{FieldName, FieldSet};

/// Text shown when there is nothing to render
pub const PLACEHOLDER: &str = "Fill in the form to see your config";

/// Split a comma separated tag list, trimming pieces and dropping empties
#[must_use]
pub fn split_tags(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Render the entry text for already-validated fields
///
/// Returns `None` when no field produced a line.
#[must_use]
pub fn render_entry(fields: &FieldSet) -> Option<String> {
    let mut out = String::new();

    for (field, value) in fields.entries() {
        if field == FieldName::Tags {
            let tags = split_tags(value);
            if tags.is_empty() {
                continue;
            }
            let quoted: Vec<String> = tags.iter().map(|t| format!("\"{t}\"")).collect();
            out.push_str(&format!("tags: [{}]\n", quoted.join(", ")));
        } else {
            out.push_str(&format!("{}: \"{value}\"\n", field.key()));
        }
    }

    (!out.is_empty()).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_trimmed_and_empties_dropped() {
        assert_eq!(split_tags("a, b ,,c"), vec!["a", "b", "c"]);
        assert_eq!(split_tags(" , ,"), Vec::<&str>::new());
        assert_eq!(split_tags("solo"), vec!["solo"]);
    }

    #[test]
    fn tags_line_format() {
        let fields = FieldSet::new().with(FieldName::Tags, "a, b ,,c");
        assert_eq!(
            render_entry(&fields).as_deref(),
            Some("tags: [\"a\", \"b\", \"c\"]\n")
        );
    }

    #[test]
    fn blank_tags_are_omitted() {
        let fields = FieldSet::new()
            .with(FieldName::Name, "App")
            .with(FieldName::Tags, " ,  , ");
        assert_eq!(render_entry(&fields).as_deref(), Some("name: \"App\"\n"));
    }

    #[test]
    fn quotes_are_not_escaped() {
        let fields = FieldSet::new().with(FieldName::Description, "say \"hi\"");
        assert_eq!(
            render_entry(&fields).as_deref(),
            Some("description: \"say \"hi\"\"\n")
        );
    }

    #[test]
    fn optional_fields_render_in_declared_order() {
        let fields = FieldSet::new()
            .with(FieldName::Homepage, "https://h.io")
            .with(FieldName::Takedown, "mail@h.io")
            .with(FieldName::Sha256sum, "abc");
        assert_eq!(
            render_entry(&fields).as_deref(),
            Some("takedown: \"mail@h.io\"\nsha256sum: \"abc\"\nhomepage: \"https://h.io\"\n")
        );
    }

    #[test]
    fn nothing_to_render() {
        assert_eq!(render_entry(&FieldSet::new()), None);
        assert_eq!(render_entry(&FieldSet::new().with(FieldName::Tags, ",")), None);
    }
}
