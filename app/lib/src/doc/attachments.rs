//! Documents with a flat attachment table.
//!
//! Attachments are stored under `_attachments` keyed by slash-delimited
//! paths (`photos/2024/cat.jpg`). [`below_path`] selects the entries under a
//! directory-like prefix.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::Result;

/// Metadata stored for one attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    /// MIME type of the attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    /// Content digest, e.g. `md5-...`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Whether the body is omitted and only metadata is present.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stub: bool,
    /// Any other metadata keys, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A JSON document with its attachment table split out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Attachment path to metadata.
    #[serde(
        rename = "_attachments",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub attachments: BTreeMap<String, AttachmentMeta>,
    /// Every other top-level key.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Decode a document from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Decode a document from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Attachments under `prefix`. See [`below_path`].
    pub fn below_path(&self, prefix: &str) -> BTreeMap<String, &AttachmentMeta> {
        below_path(self, prefix)
    }
}

/// Attachments whose path starts with `prefix + "/"`, keyed by the rest of
/// the path.
///
/// # Examples
///
/// ```
/// use formcsv::{below_path, Document};
///
/// let doc = Document::from_json(r#"{
///     "_attachments": {
///         "photos/cat.jpg": {"content_type": "image/jpeg", "length": 10},
///         "photos/2024/dog.jpg": {"content_type": "image/jpeg"},
///         "photosets/x.jpg": {}
///     }
/// }"#).unwrap();
///
/// let photos = below_path(&doc, "photos");
/// assert_eq!(photos.keys().collect::<Vec<_>>(), vec!["2024/dog.jpg", "cat.jpg"]);
/// ```
pub fn below_path<'d>(doc: &'d Document, prefix: &str) -> BTreeMap<String, &'d AttachmentMeta> {
    let dir = format!("{}/", prefix);
    doc.attachments
        .iter()
        .filter_map(|(path, meta)| {
            path.strip_prefix(dir.as_str())
                .map(|rest| (rest.to_string(), meta))
        })
        .collect()
}

/// [`below_path`] over an untyped JSON document.
///
/// A missing or non-object `_attachments` member yields an empty map.
pub fn below_path_value(doc: &Value, prefix: &str) -> Map<String, Value> {
    let dir = format!("{}/", prefix);
    let Some(attachments) = doc.get("_attachments").and_then(Value::as_object) else {
        return Map::new();
    };
    attachments
        .iter()
        .filter_map(|(path, meta)| {
            path.strip_prefix(dir.as_str())
                .map(|rest| (rest.to_string(), meta.clone()))
        })
        .collect()
}
