// Candidate scoring and best-match selection

use crate::fingerprint::{Field, Fingerprint};
use crate::weights::Weights;
use relocator_scanner::{LocateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A candidate fingerprint with its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub fingerprint: Fingerprint,
    pub weight: u32,
    /// Scored fields equal to the original's, in trace order.
    pub matched: Vec<Field>,
}

impl ScoredCandidate {
    pub fn index(&self) -> usize {
        self.fingerprint.index
    }
}

/// Which candidate survives when several share the maximum weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// The most recently processed candidate replaces earlier ones.
    #[default]
    #[serde(rename = "last")]
    LastSeen,
    /// The first candidate reaching a weight keeps it.
    #[serde(rename = "first")]
    FirstSeen,
}

impl TieBreak {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "last" | "last-seen" => Some(TieBreak::LastSeen),
            "first" | "first-seen" => Some(TieBreak::FirstSeen),
            _ => None,
        }
    }
}

/// Outcome of [`select_best`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub winner: ScoredCandidate,
    pub max_weight: u32,
    /// Number of candidates sharing `max_weight`, the winner included.
    pub ties: usize,
    /// Every candidate in the order it was processed.
    pub scored: Vec<ScoredCandidate>,
}

/// Score one candidate against the original.
///
/// `tag` is never scored (candidates share the original's tag by
/// construction) and `index` is never compared. Two absent values count as
/// equal. The sum saturates at `u32::MAX` instead of wrapping.
pub fn score(original: &Fingerprint, candidate: &Fingerprint, weights: &Weights) -> ScoredCandidate {
    let mut weight: u32 = 0;
    let mut matched = Vec::new();

    for field in Field::SCORED {
        if candidate.get(field) == original.get(field) {
            let increase = weights.weight(field);
            debug!(
                "\"{}\" parameter is identical, candidate weight is increased by {}",
                field, increase
            );
            weight = weight.saturating_add(increase);
            matched.push(field);
        }
    }

    ScoredCandidate {
        fingerprint: candidate.clone(),
        weight,
        matched,
    }
}

/// Score every candidate and pick the one with the highest weight.
///
/// Candidates are bucketed by weight in processing order; with
/// [`TieBreak::LastSeen`] a later candidate overwrites an earlier one of the
/// same weight.
pub fn select_best(
    original: &Fingerprint,
    candidates: &[Fingerprint],
    weights: &Weights,
    tie_break: TieBreak,
) -> Result<Selection> {
    if candidates.is_empty() {
        let tag = original.tag.clone().unwrap_or_default();
        return Err(LocateError::NoCandidates(tag));
    }

    let mut scored = Vec::with_capacity(candidates.len());
    let mut by_weight: BTreeMap<u32, usize> = BTreeMap::new();

    for candidate in candidates {
        let candidate = score(original, candidate, weights);
        info!(
            "Candidate #{}: weight {} (matched: {})",
            candidate.index(),
            candidate.weight,
            field_list(&candidate.matched)
        );

        let position = scored.len();
        match tie_break {
            TieBreak::LastSeen => {
                by_weight.insert(candidate.weight, position);
            }
            TieBreak::FirstSeen => {
                by_weight.entry(candidate.weight).or_insert(position);
            }
        }
        scored.push(candidate);
    }

    let (&max_weight, &position) = by_weight
        .last_key_value()
        .ok_or_else(|| LocateError::NoCandidates(original.tag.clone().unwrap_or_default()))?;
    let ties = scored.iter().filter(|c| c.weight == max_weight).count();
    let winner = scored[position].clone();

    if ties > 1 {
        warn!(
            "{} candidates share the biggest weight {}, picked candidate #{}",
            ties,
            max_weight,
            winner.index()
        );
    }
    info!("Biggest element weight: {}", max_weight);

    Ok(Selection {
        winner,
        max_weight,
        ties,
        scored,
    })
}

pub(crate) fn field_list(fields: &[Field]) -> String {
    if fields.is_empty() {
        return "none".to_string();
    }
    fields
        .iter()
        .map(Field::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(id: Option<&str>, class: Option<&str>, content: Option<&str>, index: usize) -> Fingerprint {
        Fingerprint {
            tag: Some("a".to_string()),
            id: id.map(String::from),
            class_name: class.map(String::from),
            title: None,
            href: None,
            content: content.map(String::from),
            index,
        }
    }

    #[test]
    fn test_self_score_is_maximum_for_shape() {
        let original = Fingerprint {
            tag: Some("a".to_string()),
            id: Some("ok".to_string()),
            class_name: Some("btn".to_string()),
            title: Some("Make-Button".to_string()),
            href: Some("#ok".to_string()),
            content: Some("Make everything OK".to_string()),
            index: 0,
        };

        let scored = score(&original, &original, &Weights::default());
        assert_eq!(scored.weight, 10 + 5 + 1 + 1 + 1);
        assert_eq!(scored.matched, Field::SCORED.to_vec());
    }

    #[test]
    fn test_score_saturates_on_huge_weights() {
        let weights = Weights {
            id: u32::MAX,
            content: 5,
            ..Weights::default()
        };
        let original = fp(Some("ok"), Some("btn"), Some("OK"), 0);

        let scored = score(&original, &original, &weights);
        assert_eq!(scored.weight, u32::MAX);

        let other = fp(Some("ok"), Some("btn"), Some("Cancel"), 1);
        let selection = select_best(&original, &[original.clone(), other], &weights, TieBreak::FirstSeen).unwrap();
        assert_eq!(selection.winner.index(), 0);
        assert_eq!(selection.max_weight, u32::MAX);
        assert_eq!(selection.ties, 2);
    }

    #[test]
    fn test_both_absent_counts_as_match() {
        let original = fp(None, None, None, 0);
        let scored = score(&original, &fp(None, None, None, 1), &Weights::default());
        assert_eq!(scored.weight, 18);
    }

    #[test]
    fn test_tag_and_index_are_not_scored() {
        let weights = Weights {
            tag: 100,
            ..Weights::default()
        };
        let original = fp(Some("x"), None, None, 0);
        let mut candidate = fp(Some("x"), None, None, 7);
        candidate.tag = Some("button".to_string());

        let scored = score(&original, &candidate, &weights);
        assert!(!scored.matched.contains(&Field::Tag));
        assert_eq!(scored.weight, 18);
    }

    #[test]
    fn test_equality_is_exact() {
        let original = fp(None, Some("btn"), Some("OK"), 0);
        let candidate = fp(None, Some("BTN"), Some("OK "), 1);

        let scored = score(&original, &candidate, &Weights::default());
        assert!(!scored.matched.contains(&Field::Class));
        assert!(!scored.matched.contains(&Field::Content));
    }

    #[test]
    fn test_select_best_picks_highest_weight() {
        let original = fp(Some("ok"), Some("btn"), Some("OK"), 0);
        let candidates = vec![
            fp(None, Some("btn"), None, 0),
            fp(None, Some("btn"), Some("OK"), 1),
            fp(None, None, None, 2),
        ];

        let selection =
            select_best(&original, &candidates, &Weights::default(), TieBreak::LastSeen).unwrap();
        assert_eq!(selection.winner.index(), 1);
        assert_eq!(selection.max_weight, 5 + 1 + 1 + 1);
        assert_eq!(selection.ties, 1);
        assert_eq!(selection.scored.len(), 3);
    }

    #[test]
    fn test_select_best_tie_keeps_last_seen() {
        let original = fp(Some("ok"), None, None, 0);
        let candidates = vec![fp(Some("ok"), None, None, 0), fp(Some("ok"), None, None, 1)];

        let selection =
            select_best(&original, &candidates, &Weights::default(), TieBreak::LastSeen).unwrap();
        assert_eq!(selection.winner.index(), 1);
        assert_eq!(selection.ties, 2);
    }

    #[test]
    fn test_select_best_tie_first_seen() {
        let original = fp(Some("ok"), None, None, 0);
        let candidates = vec![fp(Some("ok"), None, None, 0), fp(Some("ok"), None, None, 1)];

        let selection =
            select_best(&original, &candidates, &Weights::default(), TieBreak::FirstSeen).unwrap();
        assert_eq!(selection.winner.index(), 0);
    }

    #[test]
    fn test_breaking_one_attribute_lowers_weight_and_changes_winner() {
        let original = fp(Some("ok"), Some("btn"), Some("OK"), 0);
        let unique = fp(Some("ok"), Some("btn"), Some("OK"), 0);
        let runner_up = fp(Some("ok"), Some("btn-alt"), Some("OK"), 1);

        let before = select_best(
            &original,
            &[unique.clone(), runner_up.clone()],
            &Weights::default(),
            TieBreak::LastSeen,
        )
        .unwrap();
        assert_eq!(before.winner.index(), 0);

        let mut broken = unique;
        broken.class_name = Some("btn-danger".to_string());
        let after = select_best(
            &original,
            &[broken, runner_up],
            &Weights::default(),
            TieBreak::LastSeen,
        )
        .unwrap();

        assert!(after.scored[0].weight < before.scored[0].weight);
        assert_eq!(after.winner.index(), 1);
    }

    #[test]
    fn test_select_best_empty_is_error() {
        let original = fp(Some("ok"), None, None, 0);
        let result = select_best(&original, &[], &Weights::default(), TieBreak::LastSeen);
        assert!(matches!(result, Err(LocateError::NoCandidates(tag)) if tag == "a"));
    }

    #[test]
    fn test_custom_weights_change_winner() {
        let original = fp(Some("ok"), Some("btn"), Some("OK"), 0);
        let candidates = vec![fp(Some("ok"), None, None, 0), fp(None, Some("btn"), Some("OK"), 1)];

        let default =
            select_best(&original, &candidates, &Weights::default(), TieBreak::LastSeen).unwrap();
        assert_eq!(default.winner.index(), 0);

        let content_heavy = Weights {
            content: 50,
            ..Weights::default()
        };
        let custom = select_best(&original, &candidates, &content_heavy, TieBreak::LastSeen).unwrap();
        assert_eq!(custom.winner.index(), 1);
    }

    #[test]
    fn test_tie_break_from_str() {
        assert_eq!(TieBreak::from_str("last"), Some(TieBreak::LastSeen));
        assert_eq!(TieBreak::from_str("First-Seen"), Some(TieBreak::FirstSeen));
        assert_eq!(TieBreak::from_str("random"), None);
    }

    #[test]
    fn test_field_list() {
        assert_eq!(field_list(&[]), "none");
        assert_eq!(field_list(&[Field::Id, Field::Content]), "id, content");
    }
}
