use anyhow::{Context, Result, bail};
use jsonschema::validator_for;
use serde_json::Value;

use crate::io::{DocumentFormat, parse_document_any};

use super::model::FormDefinition;

/// JSON Schema of form definition documents.
pub fn definition_schema() -> Value {
    let schema = schemars::schema_for!(FormDefinition);
    serde_json::to_value(schema).unwrap_or_default()
}

/// Validate a parsed document against [`definition_schema`], deserialize it
/// and check that every field builds.
pub fn load_definition_value(value: Value) -> Result<FormDefinition> {
    let schema = definition_schema();
    let validator = validator_for(&schema).context("failed to compile form definition schema")?;
    let issues: Vec<String> = validator
        .iter_errors(&value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect();
    if !issues.is_empty() {
        bail!("invalid form definition:\n  {}", issues.join("\n  "));
    }

    let definition: FormDefinition =
        serde_json::from_value(value).context("document is not a valid form definition")?;
    definition.build().context("invalid form definition")?;
    tracing::debug!(fields = definition.fields.len(), "loaded form definition");
    Ok(definition)
}

/// Parse `contents` (trying `preferred` first) and load it.
pub fn load_definition_str(contents: &str, preferred: DocumentFormat) -> Result<FormDefinition> {
    let value = parse_document_any(contents, preferred)?;
    load_definition_value(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::definition::FieldKind;

    #[test]
    fn schema_describes_fields() {
        let schema = definition_schema();
        let properties = schema
            .pointer("/properties")
            .and_then(Value::as_object)
            .expect("properties");
        assert!(properties.contains_key("fields"));
        assert!(properties.contains_key("submitLabel"));
    }

    #[test]
    fn loads_valid_document() {
        let definition = load_definition_str(
            r#"{
                "fields": [
                    { "name": "user", "label": "User", "required": true },
                    { "kind": "select", "name": "color", "options": ["red", { "label": "Blue", "value": "blue" }] }
                ]
            }"#,
            DocumentFormat::Json,
        )
        .expect("load");
        assert_eq!(definition.fields.len(), 2);
        assert_eq!(definition.fields[0].kind, FieldKind::Input);
        assert_eq!(definition.fields[1].kind, FieldKind::Select);
    }

    #[test]
    fn reports_schema_violations_with_pointers() {
        let err = load_definition_value(json!({ "fields": [{ "name": "a", "kind": "radio" }] }))
            .expect_err("unknown kind");
        assert!(err.to_string().contains("/fields/0/kind"), "{err}");

        let err = load_definition_value(json!({ "fields": [{ "label": "No name" }] }))
            .expect_err("missing name");
        assert!(err.to_string().contains("/fields/0"), "{err}");
    }

    #[test]
    fn reports_build_failures() {
        let err = load_definition_value(json!({
            "fields": [{ "name": "n", "min": 3, "max": 1 }]
        }))
        .expect_err("range");
        let chain = format!("{err:#}");
        assert!(chain.contains("/fields/0/min: min 3 exceeds max 1"), "{chain}");
    }

    #[test]
    fn rejects_unknown_message_flags() {
        let err = load_definition_value(json!({
            "fields": [{ "name": "n", "messages": { "tooFancy": "no" } }]
        }))
        .expect_err("flag");
        assert!(!err.to_string().is_empty());
    }
}
