use colorbook_codec::{component_range, ColorBook, ValidationError, CODE_LEN};
use jsonschema::Validator;
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::{Result, SchemaError};
use crate::schema::{apply_strict_mode, BOOK_SCHEMA};

/// Compiled validator for the JSON form of a color book.
pub struct BookValidator {
    validator: Validator,
    config: ValidatorConfig,
}

impl BookValidator {
    /// Compile the embedded schema with default config.
    pub fn new() -> Result<Self> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Compile the embedded schema with explicit config.
    pub fn with_config(config: ValidatorConfig) -> Result<Self> {
        let mut schema: Value = serde_json::from_str(BOOK_SCHEMA)?;
        if config.strict_mode {
            apply_strict_mode(&mut schema);
        }

        let validator = jsonschema::validator_for(&schema)
            .map_err(|err| SchemaError::CompileFailed(err.to_string()))?;

        Ok(Self { validator, config })
    }

    /// Parse and validate a JSON document, returning the typed book.
    pub fn validate_json(&self, document: &[u8]) -> Result<ColorBook> {
        let value: Value = serde_json::from_slice(document)?;
        self.validate_value(&value)
    }

    /// Validate an already-parsed JSON value, returning the typed book.
    pub fn validate_value(&self, value: &Value) -> Result<ColorBook> {
        let mut errors = self.validator.iter_errors(value);
        if let Some(first) = errors.next() {
            let mut message = first.to_string();
            for err in errors.take(self.config.max_reported_errors) {
                message.push_str("; ");
                message.push_str(&err.to_string());
            }
            tracing::debug!(%message, "color book failed schema validation");
            return Err(SchemaError::ValidationFailed { message });
        }

        let book: ColorBook = serde_json::from_value(value.clone())?;
        check_invariants(&book)?;
        tracing::debug!(
            id = book.id,
            colors = book.colors.len(),
            color_space = %book.color_space,
            "color book is valid"
        );
        Ok(book)
    }

    /// Get validator configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// Check the invariants a typed book must hold before it can be encoded.
///
/// Covers what the schema cannot express: component counts and ranges that
/// depend on the book's color space.
pub fn check_invariants(book: &ColorBook) -> Result<()> {
    if book.colors.len() > usize::from(u16::MAX) {
        return Err(ValidationError::TooManyColors(book.colors.len()).into());
    }

    let space = book.color_space;
    for (index, color) in book.colors.iter().enumerate() {
        if !color.code.is_ascii() || color.code.len() != CODE_LEN {
            return Err(ValidationError::InvalidCode {
                index,
                code: color.code.clone(),
            }
            .into());
        }

        if color.components.len() != space.component_count() {
            return Err(ValidationError::ComponentCount {
                index,
                space,
                expected: space.component_count(),
                actual: color.components.len(),
            }
            .into());
        }

        for (component, value) in color.components.iter().enumerate() {
            let range = component_range(space, component);
            if !range.contains(value) {
                return Err(SchemaError::invariant(
                    format!("/colors/{index}/components/{component}"),
                    format!(
                        "{space} component {value} is outside {}..={}",
                        range.start(),
                        range.end()
                    ),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use colorbook_codec::ColorSpace;
    use serde_json::json;

    use super::*;

    fn book_json() -> Value {
        json!({
            "id": 3002,
            "title": "Process",
            "colorNamePrefix": "P ",
            "colorNameSuffix": "",
            "description": "",
            "pageSize": 7,
            "pageMidPoint": 4,
            "colorSpace": "CMYK",
            "colors": [
                { "name": "Cyan", "code": "C00100", "components": [100, 0, 0, 0] },
                { "name": "Gray", "code": "K00050", "components": [0, 0, 0, 50] }
            ],
            "isSpot": false
        })
    }

    #[test]
    fn valid_book_deserializes() {
        let validator = BookValidator::new().unwrap();
        let book = validator.validate_value(&book_json()).unwrap();
        assert_eq!(book.id, 3002);
        assert_eq!(book.color_space, ColorSpace::Cmyk);
        assert_eq!(book.colors[1].components, vec![0, 0, 0, 50]);
    }

    #[test]
    fn validate_json_parses_bytes() {
        let validator = BookValidator::new().unwrap();
        let bytes = serde_json::to_vec(&book_json()).unwrap();
        assert!(validator.validate_json(&bytes).is_ok());
        assert!(matches!(
            validator.validate_json(b"{not json"),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn schema_rejects_wrong_types() {
        let mut doc = book_json();
        doc["id"] = json!(70000);
        doc["colorSpace"] = json!("HSB");

        let validator = BookValidator::new().unwrap();
        let err = validator.validate_value(&doc).unwrap_err();
        let SchemaError::ValidationFailed { message } = &err else {
            panic!("expected schema failure, got {err:?}");
        };
        assert!(message.contains("65535"), "{message}");
        assert!(message.contains("HSB"), "{message}");
    }

    #[test]
    fn reported_errors_are_capped() {
        let doc = json!({});
        let config = ValidatorConfig {
            max_reported_errors: 1,
            ..ValidatorConfig::default()
        };
        let validator = BookValidator::with_config(config).unwrap();
        let err = validator.validate_value(&doc).unwrap_err();
        let SchemaError::ValidationFailed { message } = &err else {
            panic!("expected schema failure, got {err:?}");
        };
        assert_eq!(message.matches("; ").count(), 1);
    }

    #[test]
    fn strict_mode_rejects_unknown_fields() {
        let mut doc = book_json();
        doc["colors"][0]["pantone"] = json!(true);

        let lenient = BookValidator::new().unwrap();
        assert!(lenient.validate_value(&doc).is_ok());

        let strict = BookValidator::with_config(ValidatorConfig {
            strict_mode: true,
            ..ValidatorConfig::default()
        })
        .unwrap();
        assert!(strict.config().strict_mode);
        assert!(matches!(
            strict.validate_value(&doc),
            Err(SchemaError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn short_code_is_rejected_by_schema() {
        let mut doc = book_json();
        doc["colors"][1]["code"] = json!("K5");
        let validator = BookValidator::new().unwrap();
        assert!(matches!(
            validator.validate_value(&doc),
            Err(SchemaError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn component_count_follows_color_space() {
        let mut doc = book_json();
        doc["colorSpace"] = json!("RGB");

        let validator = BookValidator::new().unwrap();
        let err = validator.validate_value(&doc).unwrap_err();
        assert!(
            matches!(&err, SchemaError::Invariant { path, .. } if path == "/colors/0/components"),
            "{err:?}"
        );
    }

    #[test]
    fn component_range_follows_color_space() {
        let mut doc = book_json();
        doc["colors"][0]["components"] = json!([101, 0, 0, 0]);

        let validator = BookValidator::new().unwrap();
        let err = validator.validate_value(&doc).unwrap_err();
        assert!(
            matches!(&err, SchemaError::Invariant { path, .. } if path == "/colors/0/components/0"),
            "{err:?}"
        );
    }

    #[test]
    fn lab_allows_negative_chroma() {
        let mut doc = book_json();
        doc["colorSpace"] = json!("Lab");
        doc["colors"] = json!([
            { "name": "Teal", "code": "LAB001", "components": [52, -38, -128] }
        ]);
        let validator = BookValidator::new().unwrap();
        assert!(validator.validate_value(&doc).is_ok());
    }
}
