use regex::Regex;
use std::sync::OnceLock;

static TASK_ID_RE: OnceLock<Regex> = OnceLock::new();

/// A task identifier is valid iff it matches the canonical 36-character
/// hyphenated hexadecimal shape (8-4-4-4-12 groups, case-insensitive).
/// Anything else must never reach the network.
pub fn is_valid_task_id(s: &str) -> bool {
    let re = TASK_ID_RE.get_or_init(|| {
        Regex::new(r"(?i)^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$")
            .expect("task id pattern compiles")
    });
    re.is_match(s)
}

/// First hex group of the id, for compact display.
pub fn short_task_id(task_id: &str) -> &str {
    task_id.split('-').next().unwrap_or(task_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_is_valid() {
        assert!(is_valid_task_id("c504afa1-9629-45ee-a80c-7c128b80ce92"));
    }

    #[test]
    fn test_uppercase_id_is_valid() {
        assert!(is_valid_task_id("C504AFA1-9629-45EE-A80C-7C128B80CE92"));
    }

    #[test]
    fn test_rejects_non_id_strings() {
        assert!(!is_valid_task_id("not-a-uuid"));
        assert!(!is_valid_task_id(""));
        assert!(!is_valid_task_id("c504afa1"));
    }

    #[test]
    fn test_rejects_wrong_group_lengths() {
        // Third group has five digits.
        assert!(!is_valid_task_id("c504afa1-9629-45ee9-a80c-7c128b80ce92"));
        // Last group has eleven digits.
        assert!(!is_valid_task_id("c504afa1-9629-45ee-a80c-7c128b80ce9"));
    }

    #[test]
    fn test_rejects_surrounding_noise() {
        assert!(!is_valid_task_id(" c504afa1-9629-45ee-a80c-7c128b80ce92"));
        assert!(!is_valid_task_id("c504afa1-9629-45ee-a80c-7c128b80ce92x"));
    }

    #[test]
    fn test_rejects_non_hex_characters() {
        assert!(!is_valid_task_id("g504afa1-9629-45ee-a80c-7c128b80ce92"));
    }

    #[test]
    fn test_short_task_id() {
        assert_eq!(short_task_id("c504afa1-9629-45ee-a80c-7c128b80ce92"), "c504afa1");
        assert_eq!(short_task_id("plain"), "plain");
    }
}
