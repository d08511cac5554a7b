use serde_json::{Map, Value};

/// JSON Schema (2020-12) for the JSON form of a color book.
///
/// Component ranges depend on the book's color space and are checked
/// separately by [`check_invariants`](crate::check_invariants).
pub const BOOK_SCHEMA: &str = r##"{
    "$schema": "https://json-schema.org/draft/2020-12/schema",
    "title": "ColorBook",
    "type": "object",
    "properties": {
        "id": { "$ref": "#/$defs/uint16" },
        "title": { "type": "string" },
        "colorNamePrefix": { "type": "string" },
        "colorNameSuffix": { "type": "string" },
        "description": { "type": "string" },
        "pageSize": { "$ref": "#/$defs/uint16" },
        "pageMidPoint": { "$ref": "#/$defs/uint16" },
        "colorSpace": { "enum": ["RGB", "CMYK", "Lab"] },
        "colors": {
            "type": "array",
            "maxItems": 65535,
            "items": { "$ref": "#/$defs/color" }
        },
        "isSpot": { "type": "boolean" }
    },
    "required": [
        "id",
        "title",
        "colorNamePrefix",
        "colorNameSuffix",
        "description",
        "pageSize",
        "pageMidPoint",
        "colorSpace",
        "colors",
        "isSpot"
    ],
    "$defs": {
        "uint16": { "type": "integer", "minimum": 0, "maximum": 65535 },
        "color": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "code": { "type": "string", "pattern": "^[\\x00-\\x7F]{6}$" },
                "components": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 4,
                    "items": { "type": "integer", "minimum": -32768, "maximum": 32767 }
                }
            },
            "required": ["name", "code", "components"]
        }
    }
}"##;

/// Inject `additionalProperties: false` into every object schema that does
/// not set it explicitly.
pub(crate) fn apply_strict_mode(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) && !map.contains_key("additionalProperties") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            recurse_object_schema_children(map);
        }
        Value::Array(items) => {
            for item in items {
                apply_strict_mode(item);
            }
        }
        _ => {}
    }
}

fn recurse_object_schema_children(map: &mut Map<String, Value>) {
    for key in ["properties", "patternProperties", "$defs"] {
        if let Some(Value::Object(obj)) = map.get_mut(key) {
            for value in obj.values_mut() {
                apply_strict_mode(value);
            }
        }
    }

    for key in ["items", "additionalProperties", "not", "if", "then", "else"] {
        if let Some(value) = map.get_mut(key) {
            apply_strict_mode(value);
        }
    }

    for key in ["prefixItems", "allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(items)) = map.get_mut(key) {
            for item in items {
                apply_strict_mode(item);
            }
        }
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| matches!(item, Value::String(kind) if kind == "object")),
        _ => ["properties", "required", "patternProperties"]
            .iter()
            .any(|keyword| map.contains_key(*keyword)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn embedded_schema_is_valid_json() {
        let schema: Value = serde_json::from_str(BOOK_SCHEMA).unwrap();
        assert_eq!(schema["type"], "object");
        assert!(jsonschema::validator_for(&schema).is_ok());
    }

    #[test]
    fn strict_mode_closes_nested_objects() {
        let mut schema: Value = serde_json::from_str(BOOK_SCHEMA).unwrap();
        apply_strict_mode(&mut schema);

        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["$defs"]["color"]["additionalProperties"], false);
        assert!(schema["$defs"]["uint16"].get("additionalProperties").is_none());
    }

    #[test]
    fn strict_mode_keeps_explicit_additional_properties() {
        let mut schema = json!({
            "type": "object",
            "additionalProperties": { "type": "string" },
            "properties": { "inner": { "properties": { "x": {} } } }
        });
        apply_strict_mode(&mut schema);

        assert_eq!(schema["additionalProperties"], json!({ "type": "string" }));
        assert_eq!(schema["properties"]["inner"]["additionalProperties"], false);
    }
}
