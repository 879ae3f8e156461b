use crate::error::{LocateError, Result};
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static ANY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("*").expect("Failed to parse '*' selector - this is a bug"));

/// A parsed HTML snapshot.
pub struct Document {
    html: Html,
    source: Option<PathBuf>,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            source: None,
        }
    }

    /// Read and parse a document from disk. A leading `~` is expanded.
    pub fn load(path: &Path) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);

        debug!("Loading document from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|source| LocateError::Io {
            path: path.clone(),
            source,
        })?;

        let mut document = Self::parse(&content);
        document.source = Some(path);
        Ok(document)
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// First element in document order carrying the given id.
    pub fn find_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .select(&ANY_SELECTOR)
            .find(|element| element.value().id() == Some(id))
    }

    /// Every element with the given tag name, in document order.
    ///
    /// Names are compared against the parsed tree rather than turned into a
    /// CSS selector, so anything the parser accepts as a tag name (`my_el`,
    /// `x.y`) can be looked up. ASCII case is ignored.
    pub fn find_all_by_tag(&self, tag: &str) -> Result<Vec<ElementRef<'_>>> {
        if !is_tag_name(tag) {
            return Err(LocateError::InvalidTag(tag.to_string()));
        }

        let elements: Vec<_> = self
            .html
            .select(&ANY_SELECTOR)
            .filter(|element| element.value().name().eq_ignore_ascii_case(tag))
            .collect();
        debug!("Found {} <{}> elements", elements.len(), tag);

        Ok(elements)
    }
}

// A tag name ends at whitespace, '/' or '>' in the tokenizer
fn is_tag_name(tag: &str) -> bool {
    !tag.is_empty()
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '>' | '<'))
}
