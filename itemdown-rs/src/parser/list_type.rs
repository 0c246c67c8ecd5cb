//! List type definitions: reading and writing the header grammar.

use crate::error::ParseError;
use crate::parser::header::{
    BlockEntry, Header, parse_bool, parse_header, parse_number, quote_scalar, unquote,
};
use crate::types::{FieldDefinition, FieldType, ListType};
use log::debug;

pub(crate) const NAME_KEY: &str = "name";
const FIELDS_KEY: &str = "fields";
const PROMPT_KEY: &str = "llmExtractionPrompt";

/// Read the `name` scalar shared by every typed definition.
pub(crate) fn required_name(header: &Header<'_>) -> Result<String, ParseError> {
    header
        .scalar(NAME_KEY)
        .map(unquote)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ParseError::missing(NAME_KEY))
}

/// Parse a list type from header text.
///
/// Field entries without a name or with an unknown `type` are discarded;
/// the rest of the definition is kept.
pub fn parse_list_type(header: &str) -> Result<ListType, ParseError> {
    let parsed = parse_header(header);
    let name = required_name(&parsed)?;

    let fields = parsed
        .block(FIELDS_KEY)
        .map(|block| {
            block
                .entries
                .iter()
                .filter_map(|entry| {
                    let field = parse_field(entry);
                    if field.is_none() {
                        debug!("list type '{}': discarding field entry {:?}", name, entry.fields);
                    }
                    field
                })
                .collect()
        })
        .unwrap_or_default();

    let llm_extraction_prompt = parsed
        .scalar(PROMPT_KEY)
        .map(unquote)
        .filter(|prompt| !prompt.is_empty())
        .map(str::to_string);

    Ok(ListType {
        name,
        fields,
        llm_extraction_prompt,
    })
}

fn parse_field(entry: &BlockEntry<'_>) -> Option<FieldDefinition> {
    let name = entry.get("name").map(unquote).filter(|n| !n.trim().is_empty())?;
    let field_type: FieldType = entry.get("type").map(unquote)?.trim().parse().ok()?;

    Some(FieldDefinition {
        name: name.to_string(),
        field_type,
        required: entry.get("required").and_then(parse_bool).unwrap_or(false),
        min: entry.get("min").and_then(|v| parse_number(unquote(v).trim())),
        max: entry.get("max").and_then(|v| parse_number(unquote(v).trim())),
    })
}

/// Render a list type as header text (without delimiters).
pub fn format_list_type(list_type: &ListType) -> String {
    let mut out = format!("{}: {}\n", NAME_KEY, quote_scalar(&list_type.name));

    if !list_type.fields.is_empty() {
        out.push_str(FIELDS_KEY);
        out.push_str(":\n");
        for field in &list_type.fields {
            out.push_str(&format!("  - name: {}\n", quote_scalar(&field.name)));
            out.push_str(&format!("    type: {}\n", field.field_type));
            if field.required {
                out.push_str("    required: true\n");
            }
            if let Some(min) = field.min {
                out.push_str(&format!("    min: {}\n", min));
            }
            if let Some(max) = field.max {
                out.push_str(&format!("    max: {}\n", max));
            }
        }
    }

    if let Some(prompt) = &list_type.llm_extraction_prompt {
        out.push_str(&format!("{}: {}\n", PROMPT_KEY, quote_scalar(prompt)));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOOKS: &str = r#"name: Books
fields:
  - name: title
    type: text
    required: true
  - name: rating
    type: number
    min: 1
    max: 5
  - name: finished
    type: Date
llmExtractionPrompt: "Extract books: title and rating""#;

    #[test]
    fn test_parse_list_type() {
        let list_type = parse_list_type(BOOKS).unwrap();

        assert_eq!(list_type.name, "Books");
        assert_eq!(list_type.fields.len(), 3);
        assert_eq!(
            list_type.fields[0],
            FieldDefinition {
                name: "title".to_string(),
                field_type: FieldType::Text,
                required: true,
                min: None,
                max: None,
            }
        );
        assert_eq!(list_type.fields[1].min, Some(1.0));
        assert_eq!(list_type.fields[1].max, Some(5.0));
        assert_eq!(list_type.fields[2].field_type, FieldType::Date);
        assert_eq!(
            list_type.llm_extraction_prompt.as_deref(),
            Some("Extract books: title and rating")
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            parse_list_type("fields:\n  - name: a\n    type: text"),
            Err(ParseError::MissingRequiredField("name".to_string()))
        );
        assert_eq!(
            parse_list_type("name: \"\""),
            Err(ParseError::MissingRequiredField("name".to_string()))
        );
    }

    #[test]
    fn test_invalid_field_entries_are_discarded() {
        let header = "name: Movies\nfields:\n  - name: title\n    type: text\n  - name: mood\n    type: feeling\n  - type: number";
        let list_type = parse_list_type(header).unwrap();

        assert_eq!(list_type.fields.len(), 1);
        assert_eq!(list_type.fields[0].name, "title");
    }

    #[test]
    fn test_compact_fields_block() {
        let header = "name: Books\nfields:\n- name: title\n  type: text\n- name: rating\n  type: number";
        let list_type = parse_list_type(header).unwrap();

        assert_eq!(list_type.fields.len(), 2);
        assert_eq!(list_type.fields[0].name, "title");
        assert_eq!(list_type.fields[1].field_type, FieldType::Number);
    }

    #[test]
    fn test_no_fields_block() {
        let list_type = parse_list_type("name: Empty").unwrap();
        assert!(list_type.fields.is_empty());
        assert_eq!(list_type.llm_extraction_prompt, None);
    }

    #[test]
    fn test_round_trip() {
        let parsed = parse_list_type(BOOKS).unwrap();
        let reparsed = parse_list_type(&format_list_type(&parsed)).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_format_list_type() {
        let list_type = parse_list_type("name: Books\nfields:\n  - name: rating\n    type: number\n    min: 0.5").unwrap();
        assert_eq!(
            format_list_type(&list_type),
            "name: Books\nfields:\n  - name: rating\n    type: number\n    min: 0.5\n"
        );
    }
}
