//! Declarative GUIs loaded from XML documents.
//!
//! Documents are parsed into a small element tree with [`parse_document`] and
//! then turned into panes and GUIs by a [`LoadContext`]. The context resolves
//! the names a document refers to (click actions, population hooks, property
//! types and pane element names) through tables the caller fills in
//! beforehand; nothing is looked up by reflection.
//!
//! # Example
//!
//! ```
//! use horizon_inventory::item::action;
//! use horizon_inventory::xml::LoadContext;
//!
//! let mut context = LoadContext::new();
//! context.register_action("close", action(|event| {
//!     event.set_cancelled(true);
//!     Ok(())
//! }));
//!
//! let gui = context.load_chest_gui(r#"
//!     <chestgui title="Shop" rows="1">
//!         <outlinepane x="0" y="0" length="9" height="1">
//!             <item id="barrier" onClick="close"/>
//!         </outlinepane>
//!     </chestgui>
//! "#)?;
//!
//! assert_eq!(gui.title(), "Shop");
//! # Ok::<(), horizon_inventory_core::Error>(())
//! ```

mod loader;

pub use loader::{LoadContext, LoadSession, PaneLoader, PaneRegistry, PopulateHook, PropertyParser};

use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use horizon_inventory_core::logging::targets;
use horizon_inventory_core::{Error, Result};

// ============================================================================
// XmlDocument
// ============================================================================

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Create a document around `root`.
    pub fn with_root(root: XmlElement) -> Self {
        Self { root }
    }

    /// The document element.
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Consume the document, returning its root element.
    pub fn into_root(self) -> XmlElement {
        self.root
    }
}

// ============================================================================
// XmlElement
// ============================================================================

/// An element with its attributes, child elements and text content.
///
/// Comments and processing instructions are dropped while parsing; text and
/// CDATA sections are concatenated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Create an element without attributes or content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if the attribute exists.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Get an attribute that must be present.
    pub fn required_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name).ok_or_else(|| {
            Error::load(format!(
                "<{}> is missing the mandatory '{}' attribute",
                self.name, name
            ))
        })
    }

    /// Parse an optional attribute.
    ///
    /// A present value that does not parse is a load error.
    pub fn parse_attribute<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.attribute(name)
            .map(|value| self.parse_value(name, value))
            .transpose()
    }

    /// Parse an attribute that must be present.
    pub fn parse_required<T: FromStr>(&self, name: &str) -> Result<T> {
        let value = self.required_attribute(name)?;
        self.parse_value(name, value)
    }

    /// Parse an optional `true`/`false` attribute, ignoring case.
    pub fn bool_attribute(&self, name: &str) -> Result<Option<bool>> {
        self.attribute(name)
            .map(|value| parse_bool(value).ok_or_else(|| self.invalid(name, value)))
            .transpose()
    }

    fn parse_value<T: FromStr>(&self, name: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| self.invalid(name, value))
    }

    fn invalid(&self, name: &str, value: &str) -> Error {
        Error::load(format!(
            "<{}> has an invalid value for '{}': '{}'",
            self.name, name, value
        ))
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// Child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter()
    }

    /// Number of child elements.
    pub fn child_element_count(&self) -> usize {
        self.children.len()
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Gets a child element by name (first match).
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Gets all child elements with the specified name.
    pub fn children_by_name(&self, name: &str) -> Vec<&XmlElement> {
        self.children
            .iter()
            .filter(|child| child.name == name)
            .collect()
    }

    /// Gets an element at the specified path (relative to this element).
    ///
    /// Path uses forward slashes to separate element names.
    pub fn get(&self, path: &str) -> Option<&XmlElement> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |element, part| element.child(part))
    }

    // ========================================================================
    // Text Content
    // ========================================================================

    /// The text content directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append text content.
    pub fn add_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// A `true` or `false` literal, ignoring case.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse an XML string into a document.
///
/// Malformed markup, mismatched or unclosed tags and documents without an
/// element are load errors.
pub fn parse_document(source: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut element_stack: Vec<XmlElement> = Vec::new();

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf).map_err(|error| {
            Error::load(format!(
                "malformed document at position {}: {}",
                reader.error_position(),
                error
            ))
        })?;

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                element_stack.push(start_element(&start)?);
            }
            Event::End(_) => {
                if let Some(element) = element_stack.pop() {
                    attach(&mut element_stack, &mut root, element)?;
                }
            }
            Event::Empty(empty) => {
                let element = start_element(&empty)?;
                attach(&mut element_stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map_err(|error| Error::load(format!("invalid text content: {error}")))?;
                if let Some(parent) = element_stack.last_mut() {
                    parent.add_text(&content);
                }
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata).to_string();
                if let Some(parent) = element_stack.last_mut() {
                    parent.add_text(&content);
                }
            }
            // Declarations, comments, processing instructions and DOCTYPE
            // carry nothing a layout needs.
            _ => {}
        }
    }

    if let Some(open) = element_stack.last() {
        return Err(Error::load(format!(
            "document ended before <{}> was closed",
            open.name()
        )));
    }

    let root = root.ok_or_else(|| Error::load("document has no root element"))?;
    tracing::trace!(target: targets::XML, root = root.name(), "parsed document");
    Ok(XmlDocument::with_root(root))
}

fn start_element(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut element = XmlElement::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|error| {
            Error::load(format!("invalid attribute on <{}>: {}", element.name(), error))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|error| Error::load(format!("invalid attribute '{key}': {error}")))?;
        element.set_attribute(key, value.to_string());
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.add_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::load(format!(
            "document has more than one root element: <{}>",
            element.name()
        )));
    }
    *root = Some(element);
    Ok(())
}
