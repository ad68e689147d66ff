//! Fuzzy matching of city names
//!
//! Used to answer "did you mean ...?" when a query names a city the network
//! does not know. Comparison is case- and accent-insensitive, so `sao paulo`
//! matches `São Paulo`.

use strsim::{jaro_winkler, normalized_levenshtein};

/// Minimum blended similarity for a suggestion. Low enough to catch
/// single-letter typos ("campnas"), high enough to reject unrelated names.
const MIN_SIMILARITY: f64 = 0.65;

/// Lowercase and strip the diacritics that occur in Portuguese and Spanish
/// place names
pub fn fold_name(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Candidate equal to `input` after folding, if any
pub fn match_folded<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let folded = fold_name(input);
    candidates.into_iter().find(|c| fold_name(c) == folded)
}

fn similarity(input: &str, candidate: &str) -> f64 {
    // Jaro-Winkler favours shared prefixes, Levenshtein handles dropped letters
    let mut score = 0.7 * jaro_winkler(input, candidate) + 0.3 * normalized_levenshtein(input, candidate);

    // Multi-word names ("rio de janeiro") should match a close single word
    if candidate.contains(' ') || candidate.contains('-') {
        let best_part = candidate
            .split(&[' ', '-'][..])
            .filter(|part| part.len() >= 3)
            .map(|part| jaro_winkler(input, part))
            .fold(0.0, f64::max);
        if best_part > 0.85 {
            score += 0.12 * best_part;
        }
    }

    score
}

/// Closest candidate to an unknown `input`
///
/// Returns `None` when `input` already names a candidate exactly, or when
/// nothing reaches the similarity threshold.
pub fn suggest_name<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = candidates.into_iter().collect();
    if candidates.iter().any(|c| *c == input) {
        return None;
    }
    if let Some(exact) = match_folded(input, candidates.iter().copied()) {
        return Some(exact.to_string());
    }

    let folded = fold_name(input);
    if folded.is_empty() {
        return None;
    }

    let mut best_match = None;
    let mut best_score = 0.0f64;
    for candidate in candidates {
        let score = similarity(&folded, &fold_name(candidate));
        if score >= MIN_SIMILARITY && score > best_score {
            best_score = score;
            best_match = Some(candidate.to_string());
        }
    }
    best_match
}
