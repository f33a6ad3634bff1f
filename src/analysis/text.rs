//! Text preparation and tokenization

/// Reduces text to lowercase ASCII words separated by spaces
///
/// Every character that is not an ASCII letter or a space is replaced with a
/// space, so digits, punctuation and non-Latin letters all split words.
pub fn prepare_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}

/// Splits prepared text into tokens, skipping empty ones
pub fn tokenize(prepared: &str) -> impl Iterator<Item = &str> {
    prepared.split_whitespace()
}
