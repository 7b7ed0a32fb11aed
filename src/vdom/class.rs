use std::fmt;

use indexmap::IndexMap;

/// Class input accepted by components: a name (may hold several
/// space-separated names), a list, or a name to enabled-flag map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassName {
    Name(String),
    List(Vec<ClassName>),
    Toggles(IndexMap<String, bool>),
}

impl ClassName {
    fn push_into(&self, list: &mut ClassList) {
        match self {
            ClassName::Name(names) => {
                for name in names.split_whitespace() {
                    list.push(name);
                }
            }
            ClassName::List(items) => {
                for item in items {
                    item.push_into(list);
                }
            }
            ClassName::Toggles(toggles) => {
                for (name, on) in toggles {
                    if *on {
                        list.push(name);
                    }
                }
            }
        }
    }
}

impl From<&str> for ClassName {
    fn from(value: &str) -> Self {
        ClassName::Name(value.to_string())
    }
}

impl From<String> for ClassName {
    fn from(value: String) -> Self {
        ClassName::Name(value)
    }
}

impl From<Vec<ClassName>> for ClassName {
    fn from(items: Vec<ClassName>) -> Self {
        ClassName::List(items)
    }
}

impl<const N: usize> From<[(&str, bool); N]> for ClassName {
    fn from(toggles: [(&str, bool); N]) -> Self {
        ClassName::Toggles(
            toggles
                .into_iter()
                .map(|(name, on)| (name.to_string(), on))
                .collect(),
        )
    }
}

/// Ordered, de-duplicated set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str) -> Self {
        for part in name.split_whitespace() {
            self.push(part);
        }
        self
    }

    pub fn toggle(self, name: &str, on: bool) -> Self {
        if on { self.with(name) } else { self }
    }

    pub fn extend(mut self, class: Option<&ClassName>) -> Self {
        if let Some(class) = class {
            class.push_into(&mut self);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    fn push(&mut self, name: &str) {
        if !self.contains(name) {
            self.0.push(name.to_string());
        }
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
