//! Pixel-bounded word wrapping.

/// Wraps `text` into lines no wider than `max_width` pixels, measuring each
/// candidate with `measure`. Words that cannot fit on a line of their own are
/// hard-split at the character that would overflow. An empty input yields a
/// single empty line so callers always get at least one line of layout.
pub fn wrap_width(text: &str, max_width: i32, measure: impl Fn(&str) -> i32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure(word) <= max_width {
            current = word.to_string();
            continue;
        }
        // Overlong word: split at the overflowing character.
        for ch in word.chars() {
            let mut attempt = current.clone();
            attempt.push(ch);
            if measure(&attempt) > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            } else {
                current = attempt;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
