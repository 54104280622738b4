use validator::ValidateEmail;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Trimmed value of a required text field, or `None` when it is missing or blank.
pub fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims each entry and drops blank ones.
pub fn clean_list(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| required_text(Some(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("e.genius@gmail.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("  padded@example.org  "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("   "));
        assert!(!is_valid_email("notanemail"));
        assert!(!is_valid_email("@nodomain.com"));
        assert!(!is_valid_email("spaces in@email.com"));
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text(Some("  Ikeja ".into())), Some("Ikeja".into()));
        assert_eq!(required_text(Some("   ".into())), None);
        assert_eq!(required_text(Some(String::new())), None);
        assert_eq!(required_text(None), None);
    }

    #[test]
    fn clean_list_drops_blank_entries() {
        let tags = clean_list(Some(vec![" node ".into(), "".into(), "rust".into()]));
        assert_eq!(tags, vec!["node", "rust"]);
        assert!(clean_list(None).is_empty());
    }
}
