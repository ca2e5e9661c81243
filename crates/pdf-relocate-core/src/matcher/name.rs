use tracing::debug;

use super::similarity::similarity;
use crate::model::MatchCandidate;

/// A candidate must score strictly above this to be accepted.
pub const MATCH_THRESHOLD: f64 = 0.9;

/// Best-scoring candidate key for `source_key`, if any scores above
/// [`MATCH_THRESHOLD`]. Candidates are visited in the order given; on equal
/// scores the first one seen is kept.
pub fn best_match<'a, I>(source_key: &str, candidate_keys: I) -> Option<MatchCandidate>
where
    I: IntoIterator<Item = &'a str>,
{
    let best = select_best(
        candidate_keys
            .into_iter()
            .map(|key| (key, similarity(source_key, key))),
    );

    match &best {
        Some(candidate) => debug!(
            "'{}' best match '{}' ({:.4})",
            source_key, candidate.compare_key, candidate.similarity
        ),
        None => debug!("'{}' has no candidate above {}", source_key, MATCH_THRESHOLD),
    }

    best
}

/// Selection rule over already-scored candidates.
pub fn select_best<'a, I>(scored: I) -> Option<MatchCandidate>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut best: Option<(&str, f64)> = None;
    for (key, ratio) in scored {
        let current = best.map_or(0.0, |(_, r)| r);
        if ratio > MATCH_THRESHOLD && ratio > current {
            best = Some((key, ratio));
        }
    }

    best.map(|(key, ratio)| MatchCandidate {
        compare_key: key.to_string(),
        similarity: ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_candidates() {
        assert!(best_match("invoice", std::iter::empty::<&str>()).is_none());
    }

    #[test]
    fn test_exact_name_matches() {
        let best = best_match("invoice", ["other", "invoice"]).unwrap();
        assert_eq!(best.compare_key, "invoice");
        assert_eq!(best.similarity, 1.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(select_best([("exactly", 0.9)]).is_none());
        assert!(select_best([("below", 0.5), ("just_below", 0.8999)]).is_none());
        assert!(select_best([("above", 0.9001)]).is_some());
    }

    #[test]
    fn test_first_maximum_wins_ties() {
        let best = select_best([("first", 0.95), ("second", 0.97), ("third", 0.97)]).unwrap();
        assert_eq!(best.compare_key, "second");
        assert_eq!(best.similarity, 0.97);
    }

    #[test]
    fn test_later_higher_score_replaces_earlier() {
        let best = select_best([("a", 0.91), ("b", 0.99), ("c", 0.95)]).unwrap();
        assert_eq!(best.compare_key, "b");
    }

    #[test]
    fn test_near_miss_name_is_rejected() {
        // 26 / 29, just under the threshold.
        assert!(best_match("invoice_final", ["invoice_final_v2"]).is_none());
    }

    #[test]
    fn test_single_char_revision_matches() {
        let best = best_match("invoice_final_v1", ["other", "invoice_final_v2"]).unwrap();
        assert_eq!(best.compare_key, "invoice_final_v2");
    }

    #[test]
    fn test_identical_scores_keep_iteration_order() {
        // Both differ from the source by one trailing char.
        let best = best_match("quarterly_report_a", ["quarterly_report_b", "quarterly_report_c"])
            .unwrap();
        assert_eq!(best.compare_key, "quarterly_report_b");
    }

    #[test]
    fn test_empty_source_key_never_matches_real_names() {
        assert!(best_match("", ["report", "invoice"]).is_none());
    }
}
