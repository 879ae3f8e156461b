// Element fingerprints: the attribute snapshot candidates are compared by

use regex::Regex;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^\s/>!?][^\s/>]*)").expect("Failed to compile tag regex - this is a bug")
});

// Quoted attribute values may contain '>'
static OPENING_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[^>"']*(?:(?:"[^"]*"|'[^']*')[^>"']*)*>"#)
        .expect("Failed to compile opening tag regex - this is a bug")
});

static ID_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex("id"));
static CLASS_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex("class"));
static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex("title"));
static HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| attribute_regex("href"));

static CONTENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r">\s*([^<\s][^<]*?)\s*</")
        .expect("Failed to compile content regex - this is a bug")
});

fn attribute_regex(name: &str) -> Regex {
    Regex::new(&format!(r#"\s{}\s*=\s*"([^"]*)""#, name))
        .expect("Failed to compile attribute regex - this is a bug")
}

/// The comparable parts of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Id,
    Content,
    Tag,
    Class,
    Title,
    Href,
}

impl Field {
    /// Fields that contribute to a candidate's weight, in trace order.
    pub const SCORED: [Field; 5] = [
        Field::Id,
        Field::Class,
        Field::Title,
        Field::Href,
        Field::Content,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Content => "content",
            Field::Tag => "tag",
            Field::Class => "class",
            Field::Title => "title",
            Field::Href => "href",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute and content snapshot of one element.
///
/// Every field except `index` is optional: `None` means the value could not
/// be extracted, which is distinct from an empty attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub tag: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub title: Option<String>,
    pub href: Option<String>,
    pub content: Option<String>,
    /// Position among the same-tag candidates of the target document.
    pub index: usize,
}

impl Fingerprint {
    /// Extract a fingerprint from the serialized markup of a single element.
    ///
    /// Attribute patterns only look at the opening tag; content is the first
    /// non-blank text run that is directly followed by a closing marker.
    pub fn extract(markup: &str, index: usize) -> Self {
        let (opening_tag, body) = match OPENING_TAG_REGEX.find(markup) {
            // body keeps the closing '>' of the opening tag
            Some(m) => (m.as_str(), &markup[m.end() - 1..]),
            None => (markup, markup),
        };

        let fingerprint = Self {
            tag: first_capture(&TAG_REGEX, markup),
            id: first_capture(&ID_REGEX, opening_tag),
            class_name: first_capture(&CLASS_REGEX, opening_tag),
            title: first_capture(&TITLE_REGEX, opening_tag),
            href: first_capture(&HREF_REGEX, opening_tag),
            content: first_capture(&CONTENT_REGEX, body),
            index,
        };

        debug!("Extracted fingerprint from markup: {:?}", fingerprint);
        fingerprint
    }

    /// Build a fingerprint from a parsed element using attribute lookups.
    pub fn from_element(element: ElementRef<'_>, index: usize) -> Self {
        let value = element.value();
        let attr = |name: &str| value.attr(name).map(String::from);

        let text = element.text().collect::<String>();
        let text = text.trim();

        let fingerprint = Self {
            tag: Some(value.name().to_string()),
            id: attr("id"),
            class_name: attr("class"),
            title: attr("title"),
            href: attr("href"),
            content: (!text.is_empty()).then(|| text.to_string()),
            index,
        };

        debug!("Extracted fingerprint from element: {:?}", fingerprint);
        fingerprint
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Id => self.id.as_deref(),
            Field::Content => self.content.as_deref(),
            Field::Tag => self.tag.as_deref(),
            Field::Class => self.class_name.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Href => self.href.as_deref(),
        }
    }

    /// Whitespace-separated class tokens, in attribute order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }
}

fn first_capture(regex: &Regex, haystack: &str) -> Option<String> {
    regex
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// How candidate elements are turned into fingerprints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Attribute lookups on the parsed node.
    #[default]
    Structured,
    /// Pattern scan over the element's serialized HTML.
    Markup,
}

impl ExtractionMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "structured" => Some(ExtractionMode::Structured),
            "markup" => Some(ExtractionMode::Markup),
            _ => None,
        }
    }

    pub fn fingerprint(&self, element: ElementRef<'_>, index: usize) -> Fingerprint {
        match self {
            ExtractionMode::Structured => Fingerprint::from_element(element, index),
            ExtractionMode::Markup => Fingerprint::extract(&element.html(), index),
        }
    }
}
