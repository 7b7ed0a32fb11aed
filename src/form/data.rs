//! Form data: the successful controls of a form as ordered name/value pairs,
//! and their serialization.
//!
//! [`FormData::to_value`] nests bracketed names: `favorite[color]` lands in
//! an object, `tags[]` appends to an array and a name that repeats collects
//! its values in an array. The first value wins when a later bracketed name
//! would need a different kind of container at the same place.

use std::fmt;
use std::rc::Rc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Value};

/// `application/x-www-form-urlencoded` keeps these unescaped.
const FORM_URLENCODED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b' ');

/// One serialized field, handed to a [`Transform`] before nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct FormEntry {
    pub name: String,
    pub value: Value,
}

/// Rewrites an entry (rename, convert, ..); `None` drops it.
pub type Transform = Rc<dyn Fn(FormEntry) -> Option<FormEntry>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries().find(|(key, _)| *key == name).map(|(_, value)| value)
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries()
            .filter(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nested JSON object for the entries, each passed through `transform`
    /// first when given.
    pub fn to_value(&self, transform: Option<&Transform>) -> Value {
        let mut root = Value::Object(Map::new());
        for (name, value) in &self.entries {
            let entry = FormEntry {
                name: name.clone(),
                value: Value::String(value.clone()),
            };
            let entry = match transform {
                Some(transform) => match transform(entry) {
                    Some(entry) => entry,
                    None => continue,
                },
                None => entry,
            };
            let path = parse_name(&entry.name);
            if !assign(&mut root, &path, entry.value) {
                tracing::debug!(
                    name = %entry.name,
                    "dropping form entry that conflicts with an earlier value"
                );
            }
        }
        root
    }

    pub fn to_urlencoded(&self) -> String {
        self.entries()
            .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (name, value) in iter {
            data.append(name, value);
        }
        data
    }
}

impl fmt::Display for FormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_urlencoded())
    }
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_URLENCODED)
        .to_string()
        .replace(' ', "+")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Key(&'a str),
    Append,
}

/// `a[b][]` is `a`, `b`, append. Names that are not well formed are one key.
fn parse_name(name: &str) -> Vec<Segment<'_>> {
    let Some(open) = name.find('[') else {
        return vec![Segment::Key(name)];
    };
    if open == 0 {
        return vec![Segment::Key(name)];
    }
    let mut path = vec![Segment::Key(&name[..open])];
    let mut rest = &name[open..];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return vec![Segment::Key(name)];
        };
        let Some(close) = inner.find(']') else {
            return vec![Segment::Key(name)];
        };
        let key = &inner[..close];
        path.push(if key.is_empty() {
            Segment::Append
        } else {
            Segment::Key(key)
        });
        rest = &inner[close + 1..];
    }
    path
}

/// Returns `false` and leaves `target` untouched when `path` would replace
/// an existing value with a container of another kind.
fn assign(target: &mut Value, path: &[Segment<'_>], value: Value) -> bool {
    let Some((head, tail)) = path.split_first() else {
        return false;
    };
    match head {
        Segment::Append => {
            let Value::Array(items) = target else {
                return false;
            };
            if tail.is_empty() {
                items.push(value);
                return true;
            }
            let mut child = empty_container(tail);
            let assigned = assign(&mut child, tail, value);
            if assigned {
                items.push(child);
            }
            assigned
        }
        Segment::Key(key) => {
            let Value::Object(map) = target else {
                return false;
            };
            if !tail.is_empty() {
                return match map.get_mut(*key) {
                    Some(child) => assign(child, tail, value),
                    None => {
                        let mut child = empty_container(tail);
                        let assigned = assign(&mut child, tail, value);
                        if assigned {
                            map.insert((*key).to_string(), child);
                        }
                        assigned
                    }
                };
            }
            match map.get_mut(*key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert((*key).to_string(), value);
                }
            }
            true
        }
    }
}

fn empty_container(path: &[Segment<'_>]) -> Value {
    match path.first() {
        Some(Segment::Append) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_entries_become_an_object() {
        let data: FormData = [("hello", "world")].into_iter().collect();
        assert_eq!(data.to_value(None), json!({ "hello": "world" }));
    }

    #[test]
    fn repeated_names_collect_into_arrays() {
        let data: FormData = [("tag", "a"), ("tag", "b"), ("tag", "c")].into_iter().collect();
        assert_eq!(data.to_value(None), json!({ "tag": ["a", "b", "c"] }));
        assert_eq!(data.get("tag"), Some("a"));
        assert_eq!(data.get_all("tag"), ["a", "b", "c"]);
    }

    #[test]
    fn brackets_nest() {
        let data: FormData = [
            ("favorite[color]", "red"),
            ("favorite[food]", "pizza"),
            ("list[]", "1"),
            ("list[]", "2"),
            ("deep[a][b]", "x"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            data.to_value(None),
            json!({
                "favorite": { "color": "red", "food": "pizza" },
                "list": ["1", "2"],
                "deep": { "a": { "b": "x" } }
            })
        );
    }

    #[test]
    fn conflicting_names_keep_the_first_value() {
        let data: FormData = [("a", "1"), ("a[b]", "2"), ("list[]", "x"), ("list[k]", "y")]
            .into_iter()
            .collect();
        assert_eq!(data.to_value(None), json!({ "a": "1", "list": ["x"] }));

        let data: FormData = [("user[name]", "ann"), ("user[]", "x"), ("user[name][first]", "bo")]
            .into_iter()
            .collect();
        assert_eq!(data.to_value(None), json!({ "user": { "name": "ann" } }));
    }

    #[test]
    fn repeated_plain_name_accepts_appends() {
        let data: FormData = [("n", "1"), ("n", "2"), ("n[]", "3")].into_iter().collect();
        assert_eq!(data.to_value(None), json!({ "n": ["1", "2", "3"] }));
    }

    #[test]
    fn malformed_brackets_stay_literal() {
        let data: FormData = [("a[b", "1"), ("[x]", "2")].into_iter().collect();
        assert_eq!(data.to_value(None), json!({ "a[b": "1", "[x]": "2" }));
    }

    #[test]
    fn transform_renames_and_drops() {
        let transform: Transform = Rc::new(|entry: FormEntry| match entry.name.as_str() {
            "hello" => Some(FormEntry {
                name: "greeting".into(),
                ..entry
            }),
            "secret" => None,
            _ => Some(entry),
        });
        let data: FormData = [("hello", "world"), ("secret", "x"), ("keep", "y")]
            .into_iter()
            .collect();
        assert_eq!(
            data.to_value(Some(&transform)),
            json!({ "greeting": "world", "keep": "y" })
        );
    }

    #[test]
    fn urlencoding_escapes_reserved_characters() {
        let data: FormData = [("q", "a b&c"), ("name", "Zoë")].into_iter().collect();
        assert_eq!(data.to_urlencoded(), "q=a+b%26c&name=Zo%C3%AB");
    }
}
