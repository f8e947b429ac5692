//! Symptom text sanitizing and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::ConsultError;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s.,!?-]").unwrap());

/// Strips markup tags and every character outside word characters,
/// whitespace and `. , ! ? -`, then trims.
pub fn sanitize(text: &str) -> String {
    let without_tags = TAG.replace_all(text, "");
    let cleaned = DISALLOWED.replace_all(&without_tags, "");
    cleaned.trim().to_string()
}

/// Rejects empty text and text longer than `max_len` characters.
pub fn validate_symptoms(symptoms: &str, max_len: usize) -> Result<(), ConsultError> {
    if symptoms.is_empty() {
        return Err(ConsultError::InvalidInput("Symptoms cannot be empty".into()));
    }
    if symptoms.chars().count() > max_len {
        return Err(ConsultError::InvalidInput(format!(
            "Symptom description too long. Maximum length is {} characters.",
            max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(sanitize("<b>fever</b> and chills!"), "fever and chills!");
        assert_eq!(sanitize("<script>alert(1)</script>cough"), "alert1cough");
    }

    #[test]
    fn strips_disallowed_characters_and_trims() {
        assert_eq!(sanitize("  sore throat; 38°C @ night?  "), "sore throat 38C  night?");
        assert_eq!(sanitize("dizzy, tired - since Monday."), "dizzy, tired - since Monday.");
    }

    #[test]
    fn keeps_unicode_word_characters() {
        assert_eq!(sanitize("dolor de cabeza, náuseas"), "dolor de cabeza, náuseas");
    }

    #[test]
    fn empty_and_markup_only_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("<br/><hr>"), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "<b>fever</b> and chills!",
            "<<b>>nested<</b>>",
            "a < b > c",
            "rash #2 (left arm) & itching...",
            "  \ttabs\nand newlines  ",
            "<img src=x onerror=alert(1)>headache",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn rejects_empty() {
        let err = validate_symptoms("", 1000).unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Symptoms cannot be empty");
    }

    #[test]
    fn rejects_over_limit_naming_the_limit() {
        let text = "a".repeat(11);
        let err = validate_symptoms(&text, 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Symptom description too long. Maximum length is 10 characters."
        );
    }

    #[test]
    fn accepts_up_to_limit() {
        assert!(validate_symptoms("a", 10).is_ok());
        assert!(validate_symptoms(&"a".repeat(10), 10).is_ok());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(validate_symptoms(&"é".repeat(10), 10).is_ok());
    }
}
