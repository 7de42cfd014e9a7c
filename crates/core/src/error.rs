use thiserror::Error;

/// Rejection of a user-selected file before any network call.
///
/// Validation failures are never fatal: the flow reports them and keeps
/// whatever input was staged before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The declared MIME type (or extension) matches no accepted pattern.
    #[error("{file_name}: unsupported file type '{mime}' (accepted: {accepted})")]
    UnsupportedType {
        file_name: String,
        mime: String,
        accepted: String,
    },

    /// The file is larger than the policy ceiling.
    #[error("{file_name}: file is {size} bytes, the limit is {max_bytes} bytes")]
    TooLarge {
        file_name: String,
        size: u64,
        max_bytes: u64,
    },
}

/// A well-formed JSON body whose values break the result contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// A confidence value lies outside `[0, 1]`.
    #[error("confidence for {field} out of range: {value}")]
    ConfidenceOutOfRange { field: String, value: f64 },

    /// More than three top speakers were returned.
    #[error("expected at most {max} top speakers, got {got}")]
    TooManySpeakers { max: usize, got: usize },
}
