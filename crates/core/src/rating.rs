//! Explanations for publisher rating labels.

/// Returned for any rating not in the table.
pub const RATING_FALLBACK: &str = "Rating info unavailable";

const RATINGS: &[(&str, &str)] = &[
    ("True", "This claim is accurate."),
    (
        "Mostly True",
        "This claim is largely correct but may omit nuance.",
    ),
    (
        "Half True",
        "This claim has both accurate and inaccurate elements.",
    ),
    ("Mostly False", "This claim is largely inaccurate."),
    ("False", "This claim is incorrect."),
    ("Pants on Fire", "This claim is not only false but ridiculous."),
    (
        "Four Pinocchios",
        "This claim is false with no redeeming facts.",
    ),
    (
        "Three Pinocchios",
        "This claim has multiple significant errors.",
    ),
    (
        "Two Pinocchios",
        "This claim contains a mix of good and bad parts.",
    ),
];

/// Explain a textual rating. Matching is exact; unknown labels get
/// [`RATING_FALLBACK`].
pub fn explain_rating(rating: &str) -> &'static str {
    RATINGS
        .iter()
        .find(|(label, _)| *label == rating)
        .map_or(RATING_FALLBACK, |&(_, text)| text)
}

/// Whether the label has a dedicated explanation.
pub fn is_known_rating(rating: &str) -> bool {
    RATINGS.iter().any(|(label, _)| *label == rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_rating_has_its_own_text() {
        for (label, text) in RATINGS {
            assert_eq!(explain_rating(label), *text);
            assert_ne!(explain_rating(label), RATING_FALLBACK);
            assert!(is_known_rating(label));
        }
    }

    #[test]
    fn lookup_is_stable() {
        assert_eq!(explain_rating("False"), explain_rating("False"));
        assert_eq!(explain_rating("False"), "This claim is incorrect.");
    }

    #[test]
    fn unknown_ratings_fall_back() {
        for label in ["", "false", "Mostly Fake", "One Pinocchio", "TRUE "] {
            assert_eq!(explain_rating(label), RATING_FALLBACK);
            assert!(!is_known_rating(label));
        }
    }
}
