//! Virtual node tree produced by every component.
//!
//! A node is either an [`Element`] (a tag or a nested [`Component`] with
//! attributes, listeners and ordered children), a text node, or an empty slot.
//! Empty slots keep child positions stable so optional parts of a component
//! (a missing label, a missing hint) never shift their siblings.

mod class;
mod html;

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::domain::Event;

pub use class::{ClassList, ClassName};
pub use html::to_html;
pub(crate) use html::INNER_HTML;

pub type Attributes = IndexMap<String, AttrValue>;
pub type Listeners = IndexMap<EventKind, Listener>;

/// User supplied event callback. Callbacks run synchronously on the UI thread.
pub type Callback = Rc<dyn Fn(&mut Event<'_>)>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// String form used when the value lands in markup or a host control.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            AttrValue::Text(text) => Cow::Borrowed(text),
            AttrValue::Number(num) => Cow::Owned(num.to_string()),
            AttrValue::Bool(flag) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        }
    }

    /// Converts a scalar JSON value; arrays, objects and null have no attribute form.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(AttrValue::Text(text.clone())),
            Value::Number(num) => Some(AttrValue::Number(num.clone())),
            Value::Bool(flag) => Some(AttrValue::Bool(*flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(value.into())
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(value.into())
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Number(value.into())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(AttrValue::Number)
            .unwrap_or_else(|| AttrValue::Text(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Input,
    Change,
    Invalid,
    Blur,
    Focus,
    Submit,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Invalid => "invalid",
            EventKind::Blur => "blur",
            EventKind::Focus => "focus",
            EventKind::Submit => "submit",
        };
        f.write_str(name)
    }
}

/// What happens when an event reaches a node.
#[derive(Clone)]
pub enum Listener {
    /// A user callback passed through untouched.
    Callback(Callback),
    /// The component that rendered the node handles the event itself.
    Managed,
}

impl Listener {
    pub fn is_managed(&self) -> bool {
        matches!(self, Listener::Managed)
    }

    pub fn callback(&self) -> Option<&Callback> {
        match self {
            Listener::Callback(callback) => Some(callback),
            Listener::Managed => None,
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Callback(_) => f.write_str("Callback(..)"),
            Listener::Managed => f.write_str("Managed"),
        }
    }
}

/// Reference to a component that expands into plain markup.
#[derive(Clone, Copy)]
pub struct Component {
    name: &'static str,
    render: fn(&Element) -> VNode,
}

impl Component {
    pub const fn new(name: &'static str, render: fn(&Element) -> VNode) -> Self {
        Self { name, render }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn render(&self, element: &Element) -> VNode {
        (self.render)(element)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Tag(Cow<'static, str>),
    Component(Component),
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeKind::Tag(tag) => serializer.serialize_str(tag),
            NodeKind::Component(component) => serializer.serialize_str(component.name()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub attributes: Attributes,
    #[serde(serialize_with = "serialize_listeners")]
    pub listeners: Listeners,
    pub children: Vec<VNode>,
}

fn serialize_listeners<S: Serializer>(listeners: &Listeners, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(listeners.len()))?;
    for kind in listeners.keys() {
        seq.serialize_element(kind)?;
    }
    seq.end()
}

impl Element {
    pub fn tag(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_kind(NodeKind::Tag(name.into()))
    }

    pub fn component(component: Component) -> Self {
        Self::with_kind(NodeKind::Component(component))
    }

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            listeners: Listeners::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Sets the attribute only when a value is present.
    pub fn attr_opt<V: Into<AttrValue>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attributes are only present when set.
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on { self.attr(name, true) } else { self }
    }

    pub fn on(mut self, kind: EventKind, listener: Listener) -> Self {
        self.listeners.insert(kind, listener);
        self
    }

    pub fn on_opt(self, kind: EventKind, callback: Option<&Callback>) -> Self {
        match callback {
            Some(callback) => self.on(kind, Listener::Callback(Rc::clone(callback))),
            None => self,
        }
    }

    pub fn child(mut self, node: impl Into<VNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = VNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tag(tag) => Some(tag),
            NodeKind::Component(_) => None,
        }
    }

    pub fn is_tag(&self, name: &str) -> bool {
        self.tag_name() == Some(name)
    }

    pub fn is_component(&self, component: &Component) -> bool {
        matches!(&self.kind, NodeKind::Component(own) if own == component)
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn text_attr(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.get(name).and_then(AttrValue::as_bool).unwrap_or(false)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.text_attr("class")
            .unwrap_or_default()
            .split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|name| name == class)
    }

    pub fn listener(&self, kind: EventKind) -> Option<&Listener> {
        self.listeners.get(&kind)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(untagged)]
pub enum VNode {
    #[default]
    Empty,
    Text(String),
    Element(Element),
}

impl VNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, VNode::Empty)
    }

    /// First element in document order, this node included, that matches.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let VNode::Element(element) = self else {
            return None;
        };
        if predicate(element) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find(predicate))
    }

    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        let VNode::Element(element) = self else {
            return;
        };
        if predicate(element) {
            out.push(element);
        }
        for child in &element.children {
            child.find_all(predicate, out);
        }
    }

    /// Expands every component node into the markup it renders.
    pub fn resolve(&self) -> VNode {
        match self {
            VNode::Element(element) => match &element.kind {
                NodeKind::Component(component) => component.render(element).resolve(),
                NodeKind::Tag(_) => {
                    let mut resolved = element.clone();
                    resolved.children = element.children.iter().map(VNode::resolve).collect();
                    VNode::Element(resolved)
                }
            },
            other => other.clone(),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            VNode::Text(text) => out.push_str(text),
            VNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            VNode::Empty => {}
        }
    }
}

impl From<Element> for VNode {
    fn from(element: Element) -> Self {
        VNode::Element(element)
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        VNode::Text(text.to_string())
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        VNode::Text(text)
    }
}

impl<T: Into<VNode>> From<Option<T>> for VNode {
    fn from(node: Option<T>) -> Self {
        node.map(Into::into).unwrap_or_default()
    }
}
