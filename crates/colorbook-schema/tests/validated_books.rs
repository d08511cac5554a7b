use colorbook_codec::{decode_bytes, encode_to_vec, Color, ColorBook, ColorSpace};
use colorbook_schema::{check_invariants, BookValidator, SchemaError, ValidatorConfig};

fn lab_book() -> ColorBook {
    ColorBook {
        title: "Lab Sample".to_string(),
        description: "Swatches for press checks".to_string(),
        page_size: 6,
        page_mid_point: 3,
        colors: vec![
            Color::new("Teal", "LAB001", vec![52, -38, -10]),
            Color::new("Brick", "LAB002", vec![41, 45, 33]),
        ],
        ..ColorBook::new(45, ColorSpace::Lab)
    }
}

#[tokio::test]
async fn serialized_book_validates_and_survives_the_wire() {
    let book = lab_book();
    let json = serde_json::to_vec_pretty(&book).unwrap();

    let strict = BookValidator::with_config(ValidatorConfig {
        strict_mode: true,
        ..ValidatorConfig::default()
    })
    .unwrap();
    let validated = strict.validate_json(&json).unwrap();
    assert_eq!(validated, book);

    let wire = encode_to_vec(&validated).unwrap();
    assert_eq!(decode_bytes(&wire).await.unwrap(), book);
}

#[test]
fn invariants_reject_out_of_range_lab_lightness() {
    let mut book = lab_book();
    book.colors[1].components[0] = 120;

    let err = check_invariants(&book).unwrap_err();
    assert!(
        matches!(&err, SchemaError::Invariant { path, .. } if path == "/colors/1/components/0"),
        "{err:?}"
    );
    assert!(err.to_string().contains("0..=100"));
}

#[test]
fn invariants_reject_codes_the_encoder_would_reject() {
    let mut book = lab_book();
    book.colors[0].code = "LAB0001".to_string();

    assert!(encode_to_vec(&book).is_err());
    let err = check_invariants(&book).unwrap_err();
    assert!(
        matches!(&err, SchemaError::Invariant { path, .. } if path == "/colors/0/code"),
        "{err:?}"
    );
}
