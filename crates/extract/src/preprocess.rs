//! Text normalization shared by all extraction methods.

/// Punctuation kept through preprocessing. Everything else that is not
/// alphanumeric or whitespace is treated as noise.
const KEPT_PUNCTUATION: &[char] = &['.', ',', ';', ':', '(', ')', '-', '+', '#'];

/// Strip non-alphanumeric noise and normalize whitespace.
///
/// Keeps `. , ; : ( ) - + #` so that names like "c++", "c#", "node.js"
/// and list separators survive. Newlines are preserved (section matching
/// scans line boundaries); runs of other whitespace collapse to one
/// space.
pub fn preprocess(text: &str) -> String {
    let filtered: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(&c) {
                c
            } else if c == '\u{2022}' {
                // Bullets become list separators for section matching.
                ';'
            } else {
                ' '
            }
        })
        .collect();

    let mut out = String::with_capacity(filtered.len());
    for line in filtered.lines() {
        let mut first = true;
        for word in line.split_whitespace() {
            if !first {
                out.push(' ');
            }
            out.push_str(word);
            first = false;
        }
        out.push('\n');
    }
    // Drop the trailing newline added by the loop.
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_noise_and_collapses_whitespace() {
        assert_eq!(preprocess("I  know   Python!"), "I know Python");
        assert_eq!(preprocess("c++ & c# @ work"), "c++ c# work");
    }

    #[test]
    fn keeps_listed_punctuation() {
        assert_eq!(
            preprocess("skills: node.js, c++; c# (3+ years)"),
            "skills: node.js, c++; c# (3+ years)"
        );
    }

    #[test]
    fn preserves_line_boundaries() {
        let out = preprocess("skills:\npython\n\nother");
        assert_eq!(out, "skills:\npython\n\nother");
    }

    #[test]
    fn bullets_become_separators() {
        assert_eq!(preprocess("• python • sql"), "; python ; sql");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess("   \t "), "");
    }
}
