// file: src/normalizer/title.rs
// description: drops short "Label:" prefixes that read like titles rather than sentences
// reference: applied after structural rewriting

use crate::normalizer::patterns::{ends_sentence, word_count};

/// Returns the right side of `left: right` when `left` is a short label.
pub fn denoise_title(text: &str) -> String {
    let Some((left, right)) = text.split_once(':') else {
        return text.to_string();
    };

    let left = left.trim();
    let right = right.trim();
    let left_words = word_count(left);

    if left_words <= 6 && !ends_sentence(left) && word_count(right) > left_words {
        right.to_string()
    } else {
        text.to_string()
    }
}
