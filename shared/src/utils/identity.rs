//! User identifier helpers

/// Lower-case a user identifier before any lookup or key construction
///
/// Surrounding whitespace is kept: `" abc"` and `"abc"` are distinct users.
pub fn normalize_user_id(user_id: &str) -> String {
    user_id.to_lowercase()
}

/// Whether an identifier carries no usable characters
pub fn is_blank_user_id(user_id: &str) -> bool {
    user_id.trim().is_empty()
}

/// Mask a user identifier for logging, keeping the first two characters
pub fn mask_user_id(user_id: &str) -> String {
    let chars: Vec<char> = user_id.chars().collect();
    match chars.len() {
        0 => String::new(),
        1..=2 => "*".repeat(chars.len()),
        n => format!("{}{}", chars[..2].iter().collect::<String>(), "*".repeat(n - 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_user_id() {
        assert_eq!(normalize_user_id("ABC"), "abc");
        assert_eq!(normalize_user_id("Mixed.Case@Example.com"), "mixed.case@example.com");
    }

    #[test]
    fn test_normalize_keeps_surrounding_whitespace() {
        assert_eq!(normalize_user_id(" ABC"), " abc");
        assert_ne!(normalize_user_id(" abc"), normalize_user_id("abc"));
    }

    #[test]
    fn test_is_blank_user_id() {
        assert!(is_blank_user_id(""));
        assert!(is_blank_user_id("   "));
        assert!(!is_blank_user_id(" a "));
    }

    #[test]
    fn test_mask_user_id() {
        assert_eq!(mask_user_id("abc"), "ab*");
        assert_eq!(mask_user_id("alice@example.com"), "al***************");
        assert_eq!(mask_user_id("ab"), "**");
        assert_eq!(mask_user_id(""), "");
    }
}
