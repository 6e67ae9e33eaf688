use crate::snapshot::model::TextTransform;

/// Text as it is rendered: case transform applied, surrounding whitespace removed.
pub fn normalize_text(raw: &str, transform: TextTransform) -> String {
    let trimmed = raw.trim();
    match transform {
        TextTransform::None => trimmed.to_string(),
        TextTransform::Uppercase => trimmed.to_uppercase(),
        TextTransform::Lowercase => trimmed.to_lowercase(),
        TextTransform::Capitalize => capitalize_words(trimmed),
    }
}

// Only the first letter of each word changes; the rest keeps its case.
fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/shape/text.rs"]
mod tests;
