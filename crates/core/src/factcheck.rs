//! Fact-check payloads and their flattening into review entries.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/factcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckRequest {
    pub text: String,
}

/// Raw fact-check response: claims, each carrying publisher reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResponse {
    #[serde(default)]
    pub claims: Option<Vec<Claim>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default, rename = "claimReview")]
    pub claim_review: Option<Vec<ClaimReview>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReview {
    #[serde(default)]
    pub textual_rating: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub publisher: Option<Publisher>,
    #[serde(default)]
    pub claim_reviewed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default)]
    pub name: Option<String>,
}

/// One publisher review, flattened for display.
///
/// Every field is optional; a missing field stays `None` rather than being
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub textual_rating: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub publisher_name: Option<String>,
    pub claim_reviewed: Option<String>,
}

impl ReviewEntry {
    /// Publisher shown in the source line, `Unknown` when absent or empty.
    pub fn publisher_label(&self) -> &str {
        match self.publisher_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown",
        }
    }

    /// Explanation for the rating, if the entry carries one.
    pub fn rating_explanation(&self) -> Option<&'static str> {
        self.textual_rating
            .as_deref()
            .map(crate::rating::explain_rating)
    }
}

impl From<&ClaimReview> for ReviewEntry {
    fn from(review: &ClaimReview) -> Self {
        Self {
            textual_rating: review.textual_rating.clone(),
            title: review.title.clone(),
            url: review.url.clone(),
            publisher_name: review.publisher.as_ref().and_then(|p| p.name.clone()),
            claim_reviewed: review.claim_reviewed.clone(),
        }
    }
}

impl FactCheckResponse {
    /// Flatten claims and their reviews, outer claim order first, then
    /// review order within each claim.
    pub fn flatten_reviews(&self) -> Vec<ReviewEntry> {
        self.claims
            .iter()
            .flatten()
            .flat_map(|claim| claim.claim_review.iter().flatten())
            .map(ReviewEntry::from)
            .collect()
    }

    /// Total number of reviews across all claims.
    pub fn review_count(&self) -> usize {
        self.claims
            .iter()
            .flatten()
            .map(|claim| claim.claim_review.as_ref().map_or(0, Vec::len))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> FactCheckResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flattens_single_review_with_all_fields() {
        let response = parse(json!({
            "claims": [{
                "claimReview": [{
                    "textualRating": "False",
                    "title": "Turbines and health",
                    "publisher": {"name": "FactSite"},
                    "claimReviewed": "Wind turbines cause cancer.",
                    "url": "https://x"
                }]
            }]
        }));
        let entries = response.flatten_reviews();
        assert_eq!(
            entries,
            vec![ReviewEntry {
                textual_rating: Some("False".into()),
                title: Some("Turbines and health".into()),
                url: Some("https://x".into()),
                publisher_name: Some("FactSite".into()),
                claim_reviewed: Some("Wind turbines cause cancer.".into()),
            }]
        );
        assert_eq!(entries[0].rating_explanation(), Some("This claim is incorrect."));
    }

    #[test]
    fn preserves_outer_then_inner_order() {
        let response = parse(json!({
            "claims": [
                {"claimReview": [{"title": "1a"}, {"title": "1b"}]},
                {"claimReview": []},
                {},
                {"claimReview": [{"title": "3a"}, {"title": "3b"}, {"title": "3c"}]}
            ]
        }));
        let titles: Vec<_> = response
            .flatten_reviews()
            .into_iter()
            .map(|e| e.title.unwrap())
            .collect();
        assert_eq!(titles, ["1a", "1b", "3a", "3b", "3c"]);
        assert_eq!(response.review_count(), 5);
    }

    #[test]
    fn missing_fields_stay_none() {
        let response = parse(json!({
            "claims": [{"claimReview": [{"publisher": {}}, {"textualRating": "Mostly True"}]}]
        }));
        let entries = response.flatten_reviews();
        assert_eq!(entries[0], ReviewEntry::default());
        assert_eq!(entries[0].publisher_label(), "Unknown");
        assert_eq!(entries[0].rating_explanation(), None);
        assert_eq!(entries[1].textual_rating.as_deref(), Some("Mostly True"));
        assert_eq!(entries[1].publisher_name, None);
    }

    #[test]
    fn absent_or_empty_claims_flatten_to_nothing() {
        assert!(parse(json!({})).flatten_reviews().is_empty());
        assert!(parse(json!({"claims": []})).flatten_reviews().is_empty());
        assert!(parse(json!({"claims": null})).flatten_reviews().is_empty());
        assert_eq!(parse(json!({})).review_count(), 0);
    }

    #[test]
    fn request_serializes_text_only() {
        let body = serde_json::to_value(FactCheckRequest {
            text: "Wind turbines cause cancer.".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"text": "Wind turbines cause cancer."}));
    }
}
