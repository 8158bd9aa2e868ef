// Output formatting — terminal tables for documents, matrices and PCA.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so document names with accented
/// letters never cause a panic.
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
    fn test_short_text_unchanged() {
        assert_eq!(truncate_chars("emma.txt", 20), "emma.txt");
    }

    #[test]
    fn test_multibyte_truncation() {
        assert_eq!(truncate_chars("Les Misérables", 8), "Les Misé...");
    }
}
