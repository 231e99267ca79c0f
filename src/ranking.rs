//! Similarity scoring and ranking of merged listing candidates.
//!
//! Scores each candidate against the normalized query with the Dice
//! coefficient over character bigrams, case-insensitive. With an author in
//! play the score is a weighted blend of title and best-author similarity;
//! without one it is the title similarity alone.

use crate::types::{Candidate, RankedCandidate};
use std::cmp::Ordering;

/// Weight of the title similarity when an author is supplied.
pub const TITLE_WEIGHT: f64 = 0.6;
/// Weight of the author similarity when an author is supplied.
pub const AUTHOR_WEIGHT: f64 = 0.4;

/// Case-insensitive Dice bigram similarity in `[0, 1]`.
fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(&a.to_lowercase(), &b.to_lowercase())
}

/// Compute the combined similarity score for one candidate.
///
/// With an author: `0.6 * title_similarity + 0.4 * author_similarity`,
/// where the author similarity is the maximum over the candidate's author
/// list (0 when the candidate lists no authors). Without an author the
/// title similarity is used directly.
pub fn score_candidate(candidate: &Candidate, title: &str, author: Option<&str>) -> f64 {
    let title_similarity = similarity(&candidate.title, title);
    match author {
        Some(author) => {
            let author_similarity = candidate
                .authors
                .iter()
                .map(|a| similarity(a, author))
                .fold(0.0_f64, f64::max);
            TITLE_WEIGHT * title_similarity + AUTHOR_WEIGHT * author_similarity
        }
        None => title_similarity,
    }
}

/// Score, sort, and truncate merged candidates.
///
/// Sorting is stable: descending by score, exact ties broken in favour of
/// audiobooks, remaining ties keeping merged input order. The result is
/// truncated to `max_matches`, bounding the detail-fetch fan-out.
pub fn rank_candidates(
    candidates: Vec<Candidate>,
    title: &str,
    author: Option<&str>,
    max_matches: usize,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let similarity = score_candidate(&candidate, title, author);
            RankedCandidate {
                candidate,
                similarity,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        match b
            .similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => b
                .candidate
                .media_type
                .tie_break_rank()
                .cmp(&a.candidate.media_type.tie_break_rank()),
            other => other,
        }
    });

    ranked.truncate(max_matches);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MediaType, SourceInfo};

    fn make_candidate(id: &str, title: &str, authors: &[&str], media_type: MediaType) -> Candidate {
        Candidate {
            id: id.to_string(),
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            url: format!("https://lubimyczytac.pl/ksiazka/{id}/x"),
            media_type,
            source: SourceInfo::lubimyczytac("https://lubimyczytac.pl"),
        }
    }

    #[test]
    fn identical_title_scores_one_case_insensitive() {
        let candidate = make_candidate("1", "MY BOOK", &[], MediaType::Book);
        let score = score_candidate(&candidate, "my book", None);
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_score_caps_at_title_weight_with_unmatched_author() {
        // Title similarity 1.0, author similarity 0.0 (disjoint bigrams).
        let candidate = make_candidate("1", "My Book", &["xxxx"], MediaType::Book);
        let score = score_candidate(&candidate, "My Book", Some("qqqq"));
        assert!((score - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn best_author_of_several_is_used() {
        let candidate = make_candidate(
            "1",
            "My Book",
            &["zzzz", "Jane Doe"],
            MediaType::Book,
        );
        let score = score_candidate(&candidate, "My Book", Some("Jane Doe"));
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn candidate_without_authors_gets_zero_author_similarity() {
        let candidate = make_candidate("1", "My Book", &[], MediaType::Book);
        let score = score_candidate(&candidate, "My Book", Some("Jane Doe"));
        assert!((score - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn scoring_is_deterministic() {
        let candidate = make_candidate("1", "Solaris", &["Stanisław Lem"], MediaType::Book);
        let a = score_candidate(&candidate, "Solaris", Some("Lem"));
        let b = score_candidate(&candidate, "Solaris", Some("Lem"));
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn results_sorted_by_score_descending() {
        let candidates = vec![
            make_candidate("1", "completely unrelated", &[], MediaType::Book),
            make_candidate("2", "My Book", &[], MediaType::Book),
            make_candidate("3", "My Books", &[], MediaType::Book),
        ];
        let ranked = rank_candidates(candidates, "My Book", None, 20);
        assert_eq!(ranked[0].candidate.id, "2");
        assert_eq!(ranked[1].candidate.id, "3");
        assert_eq!(ranked[2].candidate.id, "1");
        for pair in ranked.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn audiobook_wins_exact_similarity_tie() {
        let candidates = vec![
            make_candidate("book", "My Book", &[], MediaType::Book),
            make_candidate("audio", "My Book", &[], MediaType::Audiobook),
        ];
        let ranked = rank_candidates(candidates, "My Book", None, 20);
        assert_eq!(ranked[0].candidate.media_type, MediaType::Audiobook);
        assert_eq!(ranked[1].candidate.media_type, MediaType::Book);
    }

    #[test]
    fn remaining_ties_keep_input_order() {
        let candidates = vec![
            make_candidate("first", "My Book", &[], MediaType::Book),
            make_candidate("second", "My Book", &[], MediaType::Book),
            make_candidate("third", "My Book", &[], MediaType::Book),
        ];
        let ranked = rank_candidates(candidates, "My Book", None, 20);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn truncates_to_max_matches() {
        let candidates: Vec<Candidate> = (0..25)
            .map(|i| make_candidate(&i.to_string(), "My Book", &[], MediaType::Book))
            .collect();
        let ranked = rank_candidates(candidates, "My Book", None, 20);
        assert_eq!(ranked.len(), 20);
        // All ties: the stable sort keeps the first 20 of the merged input.
        assert_eq!(ranked[0].candidate.id, "0");
        assert_eq!(ranked[19].candidate.id, "19");
    }

    #[test]
    fn truncation_keeps_highest_scoring() {
        let mut candidates: Vec<Candidate> = (0..24)
            .map(|i| make_candidate(&i.to_string(), "unrelated text", &[], MediaType::Book))
            .collect();
        candidates.push(make_candidate("best", "My Book", &[], MediaType::Book));
        let ranked = rank_candidates(candidates, "My Book", None, 20);
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].candidate.id, "best");
    }

    #[test]
    fn empty_candidates_rank_empty() {
        assert!(rank_candidates(Vec::new(), "My Book", None, 20).is_empty());
    }

    #[test]
    fn similarity_stays_in_unit_interval() {
        let candidate = make_candidate("1", "Pan Tadeusz", &["Adam Mickiewicz"], MediaType::Book);
        let score = score_candidate(&candidate, "Tadeusz", Some("Mickiewicz"));
        assert!((0.0..=1.0).contains(&score));
    }
}
