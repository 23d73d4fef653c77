//! Helpers over raw map text and model replies.

const TITLE_MARKER: &str = "title ";

/// Returns the map title: the rest of the first line starting with `title `.
pub fn extract_title(map_text: &str) -> Option<&str> {
    map_text
        .lines()
        .filter_map(|line| line.strip_prefix(TITLE_MARKER))
        .map(str::trim)
        .find(|title| !title.is_empty())
}

/// Numbered suggestions in a reply (trimmed lines starting with a digit),
/// offered to the user as follow-up questions.
pub fn follow_up_questions(reply: &str) -> Vec<&str> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let text = "title Demo\nanchor Business [0.95, 0.63]\ncomponent Cup of Tea [0.79, 0.61]";
        assert_eq!(extract_title(text), Some("Demo"));
    }

    #[test]
    fn test_extract_title_first_match_wins() {
        let text = "component A [0.1, 0.2]\ntitle  Tea Shop \ntitle Other";
        assert_eq!(extract_title(text), Some("Tea Shop"));
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("component A [0.1, 0.2]"), None);
        assert_eq!(extract_title("  title indented"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_follow_up_questions() {
        let reply = "Here are some questions:\n\n  1. Who are the users?\n2. What is commodity?\n- not numbered\n10. Tenth one";
        assert_eq!(
            follow_up_questions(reply),
            vec!["1. Who are the users?", "2. What is commodity?", "10. Tenth one"]
        );
    }

    #[test]
    fn test_follow_up_questions_none() {
        assert!(follow_up_questions("No numbered lines here.").is_empty());
    }
}
