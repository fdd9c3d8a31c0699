//! Keyword overlap ranking between a vacancy description and the CV pool.
//!
//! Deterministic and model-free: the vacancy text is tokenized into lowercase
//! keywords and each CV scores one point per keyword found in its content.
//! Repeated keywords count repeatedly, which weights terms the vacancy
//! emphasizes.

use super::Cv;

/// Splits a vacancy description into lowercase keywords. Tokens are runs of
/// alphanumeric characters (plus `_`); everything else separates tokens.
/// Duplicates survive; empty tokens are dropped.
pub fn extract_keywords(vacancy_description: &str) -> Vec<String> {
    vacancy_description
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of keywords contained in the (already lowercased) CV content.
/// Substring containment, so short keywords can match inside longer words.
fn match_score(content_lower: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| content_lower.contains(keyword.as_str()))
        .count()
}

/// Returns up to `limit` CVs ranked by descending keyword overlap.
/// The sort is stable: equal scores keep load order.
pub fn find_top_candidates<'a>(
    cvs: &'a [Cv],
    vacancy_description: &str,
    limit: usize,
) -> Vec<&'a Cv> {
    let keywords = extract_keywords(vacancy_description);

    let mut scored: Vec<(usize, &Cv)> = cvs
        .iter()
        .map(|cv| (match_score(&cv.content.to_lowercase(), &keywords), cv))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, cv)| cv).collect()
}
