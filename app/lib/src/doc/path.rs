//! Nested lookup into JSON values.

use serde_json::Value;
use std::fmt;

/// One step of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Object member name. Also addresses an array element when it is a
    /// canonical decimal index such as `"0"` or `"12"`.
    Name(String),
    /// Array position. Also addresses an object member named by its decimal form.
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl From<usize> for Key {
    fn from(idx: usize) -> Self {
        Key::Index(idx)
    }
}

/// Ordered sequence of keys to descend through.
///
/// A single key converts into a one-element path, so `get_path(v, "a")` and
/// `get_path(v, ["a"])` are the same lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Create an empty path. Looking it up returns the root value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key.
    pub fn push(&mut self, key: impl Into<Key>) {
        self.0.push(key.into());
    }

    /// Append a key (builder pattern).
    pub fn with(mut self, key: impl Into<Key>) -> Self {
        self.push(key);
        self
    }

    /// Keys in lookup order.
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split a dotted path such as `fields.tags.0`. An empty string is the
    /// empty path.
    pub fn parse_dotted(path: &str) -> Self {
        if path.is_empty() {
            return Self::new();
        }
        Self(path.split('.').map(Key::from).collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl From<Key> for KeyPath {
    fn from(key: Key) -> Self {
        Self(vec![key])
    }
}

impl From<&str> for KeyPath {
    fn from(name: &str) -> Self {
        Self(vec![Key::from(name)])
    }
}

impl From<String> for KeyPath {
    fn from(name: String) -> Self {
        Self(vec![Key::from(name)])
    }
}

impl From<usize> for KeyPath {
    fn from(idx: usize) -> Self {
        Self(vec![Key::Index(idx)])
    }
}

impl<K: Into<Key>> From<Vec<K>> for KeyPath {
    fn from(keys: Vec<K>) -> Self {
        Self(keys.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Key> + Clone> From<&[K]> for KeyPath {
    fn from(keys: &[K]) -> Self {
        Self(keys.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for KeyPath {
    fn from(keys: [K; N]) -> Self {
        Self(keys.into_iter().map(Into::into).collect())
    }
}

/// Parse `name` as an array index, accepting only canonical decimal forms.
fn array_index(name: &str) -> Option<usize> {
    let canonical = !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_digit())
        && (name.len() == 1 || !name.starts_with('0'));
    if canonical {
        name.parse().ok()
    } else {
        None
    }
}

fn step<'v>(value: &'v Value, key: &Key) -> Option<&'v Value> {
    match (value, key) {
        (Value::Object(map), Key::Name(name)) => map.get(name),
        (Value::Object(map), Key::Index(idx)) => map.get(&idx.to_string()),
        (Value::Array(items), Key::Index(idx)) => items.get(*idx),
        (Value::Array(items), Key::Name(name)) => array_index(name).and_then(|idx| items.get(idx)),
        // Scalars and null have no members.
        _ => None,
    }
}

/// Descend into `value` key by key.
///
/// Returns `None` as soon as a key is missing or an intermediate value is a
/// scalar or null. A present `null` at the end of the path is returned as
/// `Some(&Value::Null)`.
///
/// # Examples
///
/// ```
/// use formcsv::get_path;
/// use serde_json::json;
///
/// let doc = json!({"fields": {"tags": ["a", "b"]}});
/// assert_eq!(get_path(&doc, ["fields", "tags", "1"]), Some(&json!("b")));
/// assert_eq!(get_path(&doc, "fields").map(|v| v.is_object()), Some(true));
/// assert_eq!(get_path(&doc, ["fields", "missing", "x"]), None);
/// ```
pub fn get_path(value: &Value, path: impl Into<KeyPath>) -> Option<&Value> {
    let path = path.into();
    path.keys()
        .iter()
        .try_fold(value, |current, key| step(current, key))
}
