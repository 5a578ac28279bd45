//! Feed document parsing for the TVRage XML feeds
//!
//! TVRage serves irregularly-shaped XML: a tag that repeats zero times is
//! absent, once yields a single node, and more than once yields a list.
//! This module parses a document into a [`Value`] tree that preserves that
//! ambiguous cardinality, and provides [`listify`], the one shared primitive
//! that collapses it back into a uniform ordered sequence.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, TvRageError};

/// A parsed feed node.
///
/// Structural equality (`PartialEq`) is derived; two trees built from equal
/// documents compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An element with no text, children or attributes
    Null,
    /// Text content of a leaf element
    Text(String),
    /// Child elements and attributes, keyed by name
    Map(BTreeMap<String, Value>),
    /// Repeated sibling elements, in document order
    List(Vec<Value>),
}

impl Value {
    /// Look up a child node by key. Only meaningful on `Map` nodes.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// The text content of this node, if it is a `Text` leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Shorthand for `get(key)` followed by `as_text()`.
    pub fn text_of(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }
}

/// Normalize a cardinality-ambiguous node into a uniform ordered sequence.
///
/// - absent or `Null` yields an empty sequence;
/// - a list is passed through unchanged, order preserved;
/// - anything else yields a one-element sequence.
///
/// Pure and side-effect free. Every repetition point in the feed schema
/// (seasons under a show, episodes under a season, genres and akas, show
/// entries under the listing feeds) goes through this function rather than
/// handling the single-vs-list shapes ad hoc.
///
/// # Examples
/// ```
/// use tvrage_core::feed::{listify, Value};
///
/// assert!(listify(None).is_empty());
///
/// let one = Value::Text("Drama".to_string());
/// assert_eq!(listify(Some(&one)).len(), 1);
///
/// let many = Value::List(vec![one.clone(), one.clone()]);
/// assert_eq!(listify(Some(&many)).len(), 2);
/// ```
pub fn listify(node: Option<&Value>) -> Vec<&Value> {
    match node {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::List(items)) => items.iter().collect(),
        Some(value) => vec![value],
    }
}

/// An element still being assembled while its subtree is read.
struct PendingElement {
    name: String,
    attrs: BTreeMap<String, Value>,
    children: BTreeMap<String, Value>,
    text: String,
}

impl PendingElement {
    fn new(name: String, attrs: BTreeMap<String, Value>) -> Self {
        Self {
            name,
            attrs,
            children: BTreeMap::new(),
            text: String::new(),
        }
    }

    /// Collapse the finished element into a `Value`.
    ///
    /// An element with children becomes a `Map` of children merged with its
    /// attributes. A text-only element becomes `Text` with attributes
    /// dropped, so `<network country="US">UPN</network>` reads as `"UPN"` -
    /// the shape the original feed consumers rely on. An empty element with
    /// attributes keeps them as a `Map`; a fully empty element is `Null`.
    fn finish(mut self) -> (String, Value) {
        let value = if !self.children.is_empty() {
            for (key, attr) in self.attrs {
                self.children.entry(key).or_insert(attr);
            }
            Value::Map(self.children)
        } else if !self.text.trim().is_empty() {
            Value::Text(self.text.trim().to_string())
        } else if !self.attrs.is_empty() {
            Value::Map(self.attrs)
        } else {
            Value::Null
        };
        (self.name, value)
    }
}

/// Insert a child under `key`, promoting to a `List` when the tag repeats.
fn insert_child(map: &mut BTreeMap<String, Value>, key: String, value: Value) {
    match map.entry(key) {
        std::collections::btree_map::Entry::Vacant(entry) => {
            entry.insert(value);
        }
        std::collections::btree_map::Entry::Occupied(mut entry) => match entry.get_mut() {
            Value::List(items) => items.push(value),
            existing => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::List(vec![first, value]);
            }
        },
    }
}

fn read_attrs(element: &quick_xml::events::BytesStart<'_>) -> Result<BTreeMap<String, Value>> {
    let mut attrs = BTreeMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| TvRageError::Parse(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| TvRageError::Parse(e.to_string()))?
            .into_owned();
        attrs.insert(key, Value::Text(value));
    }
    Ok(attrs)
}

/// Parse an XML document into a `Value` tree.
///
/// The result is a `Map` with a single entry for the root element, matching
/// the document-as-mapping convention of the feed consumers:
/// `parse_document("<Show>...</Show>")?.get("Show")` is the show node.
///
/// # Errors
/// Returns [`TvRageError::Parse`] on malformed input (mismatched tags,
/// invalid entities, or a document with no root element).
pub fn parse_document(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<PendingElement> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                let attrs = read_attrs(&element)?;
                stack.push(PendingElement::new(name, attrs));
            }
            Ok(Event::Empty(element)) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                let attrs = read_attrs(&element)?;
                let (name, value) = PendingElement::new(name, attrs).finish();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = root.or(Some((name, value))),
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    let chunk = text
                        .unescape()
                        .map_err(|e| TvRageError::Parse(e.to_string()))?;
                    current.text.push_str(&chunk);
                }
            }
            Ok(Event::CData(cdata)) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                // quick-xml verifies end-tag names against the stack for us
                let finished = stack
                    .pop()
                    .ok_or_else(|| TvRageError::Parse("unexpected closing tag".to_string()))?;
                let (name, value) = finished.finish();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = root.or(Some((name, value))),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(TvRageError::Parse(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(TvRageError::Parse("unexpected end of document".to_string()));
    }

    match root {
        Some((name, value)) => {
            let mut doc = BTreeMap::new();
            doc.insert(name, value);
            Ok(Value::Map(doc))
        }
        None => Err(TvRageError::Parse("document has no root element".to_string())),
    }
}
