use crate::fingerprint::{ExtractionMode, Fingerprint};
use crate::path::{build_path, seed_label};
use crate::scorer::{ScoredCandidate, TieBreak, select_best};
use crate::weights::Weights;
use relocator_scanner::{Document, LocateError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Identifier looked up in the origin document when none is given.
pub const DEFAULT_TARGET_ID: &str = "make-everything-ok-button";

/// Options for a single relocation
#[derive(Debug, Clone)]
pub struct RelocateOptions {
    /// Identifier of the element in the origin document
    pub target_id: String,
    pub weights: Weights,
    pub tie_break: TieBreak,
    pub extraction: ExtractionMode,
}

impl Default for RelocateOptions {
    fn default() -> Self {
        Self {
            target_id: DEFAULT_TARGET_ID.to_string(),
            weights: Weights::default(),
            tie_break: TieBreak::default(),
            extraction: ExtractionMode::default(),
        }
    }
}

/// Everything learned while relocating one element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relocation {
    pub target_id: String,
    pub original: Fingerprint,
    pub weights: Weights,
    /// Every candidate with its score, in document order
    pub candidates: Vec<ScoredCandidate>,
    pub winner: ScoredCandidate,
    pub max_weight: u32,
    /// Candidates sharing `max_weight`, the winner included
    pub ties: usize,
    pub path: String,
}

/// Find the element of `diff` that best matches the element of `origin`
/// carrying `options.target_id`.
pub fn relocate(origin: &Document, diff: &Document, options: &RelocateOptions) -> Result<Relocation> {
    let original_element = origin
        .find_by_id(&options.target_id)
        .ok_or_else(|| LocateError::ElementNotFound(options.target_id.clone()))?;

    let original = options.extraction.fingerprint(original_element, 0);
    info!("Original element: {:?}", original);

    let tag = candidate_tag(&original)?;
    let elements = diff.find_all_by_tag(&tag)?;
    if elements.is_empty() {
        return Err(LocateError::NoCandidates(tag));
    }

    let candidates: Vec<Fingerprint> = elements
        .iter()
        .enumerate()
        .map(|(index, element)| options.extraction.fingerprint(*element, index))
        .collect();

    let selection = select_best(&original, &candidates, &options.weights, options.tie_break)?;

    let element = elements[selection.winner.index()];
    let path = build_path(&element, &seed_label(&selection.winner.fingerprint));
    info!("Found element: {}", path);

    Ok(Relocation {
        target_id: options.target_id.clone(),
        original,
        weights: options.weights,
        candidates: selection.scored,
        winner: selection.winner,
        max_weight: selection.max_weight,
        ties: selection.ties,
        path,
    })
}

/// Tag the diff candidates must share with the original.
///
/// Both extraction modes always yield a tag for a parsed element, so through
/// [`relocate`] this only fails for fingerprints built by other means.
fn candidate_tag(original: &Fingerprint) -> Result<String> {
    original.tag.clone().ok_or(LocateError::UnknownTag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_tag_unknown() {
        let untagged = Fingerprint::extract("Make everything OK", 0);
        assert!(matches!(candidate_tag(&untagged), Err(LocateError::UnknownTag)));
    }

    #[test]
    fn test_candidate_tag_known() {
        let fingerprint = Fingerprint::extract(r#"<a id="ok">OK</a>"#, 0);
        assert_eq!(candidate_tag(&fingerprint).unwrap(), "a");
    }

    const ORIGIN: &str = r##"<html><body><div id="wrapper">
        <div class="panel">
            <a id="make-everything-ok-button" class="btn btn-success" href="#ok"
               title="Make-Button" rel="next">Make everything OK</a>
        </div>
    </div></body></html>"##;

    #[test]
    fn test_relocate_renamed_id() {
        let diff = r##"<html><body><div id="wrapper">
            <div class="panel">
                <a class="btn btn-danger" href="#cancel" title="Cancel">Cancel</a>
                <a id="ok-button-v2" class="btn btn-success" href="#ok"
                   title="Make-Button">Make everything OK</a>
            </div>
        </div></body></html>"##;

        let relocation = relocate(
            &Document::parse(ORIGIN),
            &Document::parse(diff),
            &RelocateOptions::default(),
        )
        .unwrap();

        assert_eq!(relocation.candidates.len(), 2);
        assert_eq!(relocation.winner.index(), 1);
        assert_eq!(relocation.max_weight, 1 + 1 + 1 + 5);
        assert_eq!(
            relocation.path,
            "html > body > div#wrapper > div.panel > a#ok-button-v2.btn.btn-success"
        );
    }

    #[test]
    fn test_relocate_missing_id() {
        let options = RelocateOptions {
            target_id: "nope".to_string(),
            ..Default::default()
        };
        let result = relocate(&Document::parse(ORIGIN), &Document::parse(ORIGIN), &options);
        assert!(matches!(result, Err(LocateError::ElementNotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_relocate_no_candidates() {
        let diff = "<html><body><button>OK</button></body></html>";
        let result = relocate(
            &Document::parse(ORIGIN),
            &Document::parse(diff),
            &RelocateOptions::default(),
        );
        assert!(matches!(result, Err(LocateError::NoCandidates(tag)) if tag == "a"));
    }
}
