use anyhow::{Context, Result};
use serde_json::Value;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse with `preferred` first, then every other compiled-in format.
pub fn parse_document_any(contents: &str, preferred: DocumentFormat) -> Result<Value> {
    let primary = match parse_document_str(contents, preferred) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    for candidate in DocumentFormat::available_formats() {
        if candidate == preferred {
            continue;
        }
        if let Ok(value) = parse_document_str(contents, candidate) {
            return Ok(value);
        }
    }
    Err(primary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json() {
        let value = parse_document_str(r#"{"fields": []}"#, DocumentFormat::Json).unwrap();
        assert_eq!(value, json!({ "fields": [] }));
    }

    #[test]
    fn reports_parse_failures() {
        let err = parse_document_str("{", DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON document"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn falls_back_to_other_formats() {
        let value = parse_document_any("fields:\n  - name: a\n", DocumentFormat::Json).unwrap();
        assert_eq!(value, json!({ "fields": [{ "name": "a" }] }));
    }
}
