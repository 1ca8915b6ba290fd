//! Mapping free-form model answers onto sentiment labels.

use tubemood_models::{Classification, SentimentLabel};

/// Detail recorded when the model returned no choices at all.
pub const CANNOT_CLASSIFY: &str = "cannot classify";

/// Map a raw model answer to a label.
///
/// Surrounding whitespace and trailing punctuation are dropped, then the
/// answer is searched case-insensitively for each category word in priority
/// order. An answer matching nothing keeps its cleaned text as detail.
pub fn parse_label(raw: &str) -> Classification {
    let cleaned = clean_answer(raw);
    let lowered = cleaned.to_lowercase();

    SentimentLabel::CATEGORIES
        .into_iter()
        .find(|label| {
            label
                .category_word()
                .is_some_and(|word| lowered.contains(&word.to_lowercase()))
        })
        .map(Classification::labeled)
        .unwrap_or_else(|| Classification::unclassified(cleaned))
}

fn clean_answer(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim()
        .to_string()
}
