//! Helpers over JSON documents: nested lookup and attachment filtering.

mod attachments;
mod path;

pub use attachments::{below_path, below_path_value, AttachmentMeta, Document};
pub use path::{get_path, Key, KeyPath};
