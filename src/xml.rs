//! Tree adapter over the parsed feed document
//!
//! The extractor only needs four things from a document tree: find a child
//! element by tag, list child elements by tag, read an attribute and read
//! text. [`FeedNode`] captures exactly that so the extraction logic never
//! names a concrete parser type.

use roxmltree::{Document, Node};

use crate::{Result, WeatherFeedError};

/// Element lookups needed by the feed extractor
pub trait FeedNode: Copy {
    /// Local tag name of this element
    fn element_name(&self) -> &str;

    /// First child element with the given tag
    fn child_element(&self, tag: &str) -> Option<Self>;

    /// All child elements with the given tag, in document order
    fn child_elements(&self, tag: &str) -> Vec<Self>;

    /// Attribute value by name
    fn attribute_value(&self, name: &str) -> Option<&str>;

    /// Direct text content (text and CDATA children), untrimmed
    fn text_content(&self) -> String;
}

impl<'a, 'input: 'a> FeedNode for Node<'a, 'input> {
    fn element_name(&self) -> &str {
        self.tag_name().name()
    }

    fn child_element(&self, tag: &str) -> Option<Self> {
        self.children()
            .find(|node| node.is_element() && node.tag_name().name() == tag)
    }

    fn child_elements(&self, tag: &str) -> Vec<Self> {
        self.children()
            .filter(|node| node.is_element() && node.tag_name().name() == tag)
            .collect()
    }

    fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name)
    }

    fn text_content(&self) -> String {
        self.children()
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect()
    }
}

/// Parse a feed body into a document tree
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml)
        .map_err(|e| WeatherFeedError::document(format!("Failed to parse feed XML: {e}")))
}
