// Readable ancestry paths such as `div > section.content#main > button#ok.btn`

use crate::fingerprint::Fingerprint;
use scraper::ElementRef;
use scraper::node::Element;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A tree node that can be walked towards the root.
pub trait PathNode: Sized {
    /// Identity of the node within its tree, used to detect parent cycles.
    fn node_key(&self) -> usize;

    /// The parent element, or `None` at the root.
    fn parent_element(&self) -> Option<Self>;

    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;
}

impl PathNode for ElementRef<'_> {
    fn node_key(&self) -> usize {
        std::ptr::from_ref::<Element>(self.value()) as usize
    }

    // The document node above <html> is not an element and ends the walk
    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}

/// Label for an ancestor: tag, then `.class` per class token, then `#id`.
pub fn node_label<N: PathNode>(node: &N) -> String {
    let mut label = node.tag_name().to_string();

    if let Some(classes) = node.attribute("class") {
        for class in classes.split_whitespace() {
            label.push('.');
            label.push_str(class);
        }
    }
    if let Some(id) = node.attribute("id") {
        label.push('#');
        label.push_str(id);
    }

    label
}

/// Label for the located element itself: tag, then `#id`, then `.class`
/// per class token.
pub fn seed_label(fingerprint: &Fingerprint) -> String {
    let mut label = fingerprint.tag.clone().unwrap_or_default();

    if let Some(ref id) = fingerprint.id {
        label.push('#');
        label.push_str(id);
    }
    for class in fingerprint.classes() {
        label.push('.');
        label.push_str(class);
    }

    label
}

/// Prepend every ancestor of `element` to `seed_label`, outermost first.
pub fn build_path<N: PathNode>(element: &N, seed_label: &str) -> String {
    let mut path = seed_label.to_string();
    let mut visited = HashSet::new();
    visited.insert(element.node_key());

    let mut current = element.parent_element();
    while let Some(node) = current {
        if !visited.insert(node.node_key()) {
            warn!("Parent cycle detected at <{}>, path truncated", node.tag_name());
            break;
        }

        path = format!("{} > {}", node_label(&node), path);
        debug!("Path step: {}", path);
        current = node.parent_element();
    }

    path
}
