use icu_normalizer::DecomposingNormalizerBorrowed;

/// Loose form used for answer comparison: lowercased, canonically decomposed
/// with combining diacritical marks (U+0300..=U+036F) removed, and trimmed.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let nfd = DecomposingNormalizerBorrowed::new_nfd();
    nfd.normalize(&lower)
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}
