//! Integration tests for the document helpers and error collection.

use formcsv::{
    below_path, below_path_value, collect, collect_errors, get_path, parse, Document, FormError,
    KeyPath,
};
use serde_json::{json, Value};

fn entry() -> Value {
    json!({
        "_id": "entry-42",
        "type": "contact",
        "emails": "ana@example.com, \"ana, work\"@example.com",
        "meta": {"history": [{"rev": 1}, {"rev": 2, "by": "ana"}]},
        "_attachments": {
            "avatar/full.png": {"content_type": "image/png", "length": 2048},
            "avatar/thumb.png": {"content_type": "image/png", "length": 128, "stub": true},
            "docs/cv.pdf": {"content_type": "application/pdf"}
        }
    })
}

#[test]
fn test_lookup_then_parse_form_field() {
    let doc = entry();
    let raw = get_path(&doc, "emails").and_then(Value::as_str).unwrap();
    let values = parse(raw);
    assert_eq!(
        values,
        vec![vec!["ana@example.com", "\"ana, work\"@example.com"]]
    );
}

#[test]
fn test_lookup_with_dotted_path() {
    let doc = entry();
    let path = KeyPath::parse_dotted("meta.history.1.by");
    assert_eq!(get_path(&doc, path), Some(&json!("ana")));
    assert_eq!(get_path(&doc, KeyPath::parse_dotted("meta.history.5.by")), None);
}

#[test]
fn test_typed_and_untyped_attachment_filters_agree() {
    let value = entry();
    let doc = Document::from_value(value.clone()).unwrap();

    let typed = below_path(&doc, "avatar");
    let untyped = below_path_value(&value, "avatar");

    assert_eq!(
        typed.keys().cloned().collect::<Vec<_>>(),
        untyped.keys().cloned().collect::<Vec<_>>()
    );
    for (name, meta) in &typed {
        let raw: formcsv::AttachmentMeta = serde_json::from_value(untyped[name].clone()).unwrap();
        assert_eq!(*meta, &raw);
    }
    assert!(typed["thumb.png"].stub);
}

#[test]
fn test_collect_validation_over_parsed_records() {
    let table = parse("ana,ana@example.com\nbob,\ncarol,carol-at-example");

    let errors: Vec<FormError> = table
        .iter()
        .enumerate()
        .flat_map(|(row, record)| {
            collect_errors(
                |record: &[String]| {
                    let mut found = Vec::new();
                    match record.get(1) {
                        None => return Err(FormError::validation(format!("row {}", row + 1), "missing email")),
                        Some(email) if email.is_empty() => {
                            found.push(FormError::validation(format!("row {}", row + 1), "email required"))
                        }
                        Some(email) if !email.contains('@') => {
                            found.push(FormError::validation(format!("row {}", row + 1), "invalid email"))
                        }
                        Some(_) => {}
                    }
                    Ok(found)
                },
                &record[..],
            )
        })
        .collect();

    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("row 2") && messages[0].contains("email required"));
    assert!(messages[1].contains("row 3") && messages[1].contains("invalid email"));
}

#[test]
fn test_collect_keeps_panics_inside() {
    let results = collect(
        |input: &str| -> formcsv::Result<Vec<usize>> {
            let table = parse(input);
            // Indexing past the end panics for single-record input.
            Ok(vec![table[0].len(), table[1].len()])
        },
        "a,b",
    );

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(FormError::ValidatorPanicked { .. })));
}
