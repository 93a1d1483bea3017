// WHY: extracted page text carries hard line breaks and layout whitespace
// Sentences are collapsed to single spaces before they are simplified or rendered

/// Collapse every whitespace run (including \r\n) into one space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_whitespace_into(text, &mut result);
    result
}

/// Same as `normalize_whitespace` but reuses the caller's buffer
fn normalize_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    for word in text.split_whitespace() {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(word);
    }
}
