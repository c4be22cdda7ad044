// Output formatting: terminal display of attributions and signatures.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so file names with accented letters
/// never cause a panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate_chars("austen.txt", 40), "austen.txt");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("émile_zola.txt", 5), "émile...");
    }
}
