//! Upload acceptance: the file handle and the policy that admits it.

use std::fmt;

use bytes::Bytes;

use crate::error::ValidationError;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// A user-selected file held in memory until it is submitted or discarded.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name as selected, including extension.
    pub name: String,
    /// Declared MIME type, as reported by the picker.
    pub mime: String,
    /// Raw file content.
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The MIME type without parameters, lowercased (`text/plain; charset=utf-8` -> `text/plain`).
    pub fn essence(&self) -> String {
        self.mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Lowercased extension including the leading dot, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_ascii_lowercase()))
    }
}

// Content is elided: audio files are megabytes of noise in a debug dump.
impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.size())
            .finish()
    }
}

/// One entry of an accept list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptPattern {
    /// Exact MIME type, e.g. `application/pdf`.
    Mime(String),
    /// Any subtype of a top-level type, e.g. `audio/*`.
    MimeWildcard(String),
    /// File extension with the leading dot, e.g. `.txt`.
    Extension(String),
}

impl AcceptPattern {
    /// Parse a pattern in the syntax of an HTML `accept` attribute.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();
        if raw.starts_with('.') {
            Self::Extension(raw)
        } else if let Some(top) = raw.strip_suffix("/*") {
            Self::MimeWildcard(top.to_string())
        } else {
            Self::Mime(raw)
        }
    }

    pub fn matches(&self, file: &UploadFile) -> bool {
        match self {
            Self::Mime(mime) => file.essence() == *mime,
            Self::MimeWildcard(top) => file
                .essence()
                .split_once('/')
                .is_some_and(|(t, sub)| t == top && !sub.is_empty()),
            Self::Extension(ext) => file.extension().as_deref() == Some(ext.as_str()),
        }
    }
}

impl fmt::Display for AcceptPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mime(mime) => f.write_str(mime),
            Self::MimeWildcard(top) => write!(f, "{top}/*"),
            Self::Extension(ext) => f.write_str(ext),
        }
    }
}

/// Accepted types and size ceiling for one upload control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    accept: Vec<AcceptPattern>,
    max_size_mb: u64,
}

impl UploadPolicy {
    pub fn new<I, S>(accept: I, max_size_mb: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accept: accept
                .into_iter()
                .map(|p| AcceptPattern::parse(p.as_ref()))
                .collect(),
            max_size_mb,
        }
    }

    /// Any audio type, up to 10 MB.
    pub fn audio() -> Self {
        Self::new(["audio/*"], 10)
    }

    /// Plain text or PDF claim documents, up to 10 MB.
    pub fn documents() -> Self {
        Self::new(["text/plain", "application/pdf"], 10)
    }

    pub fn accept(&self) -> &[AcceptPattern] {
        &self.accept
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Whether the file's declared type matches any accepted pattern.
    pub fn admits_type(&self, file: &UploadFile) -> bool {
        self.accept.iter().any(|p| p.matches(file))
    }

    /// Validate a file, handing it back on success.
    ///
    /// Type is checked before size, so an oversized file of the wrong kind
    /// reports the type problem.
    pub fn check(&self, file: UploadFile) -> Result<UploadFile, ValidationError> {
        if !self.admits_type(&file) {
            return Err(ValidationError::UnsupportedType {
                accepted: self.accepted_list(),
                file_name: file.name,
                mime: file.mime,
            });
        }
        let max_bytes = self.max_bytes();
        if file.size() > max_bytes {
            return Err(ValidationError::TooLarge {
                size: file.size(),
                file_name: file.name,
                max_bytes,
            });
        }
        Ok(file)
    }

    fn accepted_list(&self) -> String {
        self.accept
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, len: usize) -> UploadFile {
        UploadFile::new(name, mime, vec![0u8; len])
    }

    #[test]
    fn audio_policy_accepts_any_audio_subtype() {
        let policy = UploadPolicy::audio();
        assert!(policy.check(file("a.wav", "audio/wav", 16)).is_ok());
        assert!(policy.check(file("a.mp3", "audio/mpeg", 16)).is_ok());
        assert!(policy.check(file("a.ogg", "Audio/OGG", 16)).is_ok());
    }

    #[test]
    fn audio_policy_rejects_other_types() {
        let policy = UploadPolicy::audio();
        let err = policy.check(file("v.mp4", "video/mp4", 16)).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { ref mime, .. } if mime == "video/mp4"));
        assert!(policy.check(file("x", "audio/", 16)).is_err());
        assert!(policy.check(file("x", "", 16)).is_err());
    }

    #[test]
    fn documents_policy_strips_mime_parameters() {
        let policy = UploadPolicy::documents();
        assert!(policy.check(file("c.txt", "text/plain; charset=utf-8", 4)).is_ok());
        assert!(policy.check(file("c.pdf", "application/pdf", 4)).is_ok());
        assert!(policy.check(file("c.md", "text/markdown", 4)).is_err());
    }

    #[test]
    fn extension_patterns_match_case_insensitively() {
        let policy = UploadPolicy::new([".txt"], 1);
        assert!(policy.check(file("NOTES.TXT", "", 4)).is_ok());
        assert!(policy.check(file(".txt", "", 4)).is_err());
        assert!(policy.check(file("notes.txt.bak", "", 4)).is_err());
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        let policy = UploadPolicy::new(["audio/*"], 1);
        assert!(policy.check(file("a.wav", "audio/wav", 1024 * 1024)).is_ok());
        let err = policy
            .check(file("a.wav", "audio/wav", 1024 * 1024 + 1))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                file_name: "a.wav".into(),
                size: 1024 * 1024 + 1,
                max_bytes: 1024 * 1024,
            }
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        let policy = UploadPolicy::new(["audio/*"], 1);
        let err = policy
            .check(file("big.mp4", "video/mp4", 2 * 1024 * 1024))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
    }

    #[test]
    fn unsupported_type_message_lists_patterns() {
        let err = UploadPolicy::documents()
            .check(file("a.wav", "audio/wav", 1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "a.wav: unsupported file type 'audio/wav' (accepted: text/plain, application/pdf)"
        );
    }

    #[test]
    fn debug_elides_content() {
        let f = file("a.wav", "audio/wav", 3);
        assert_eq!(
            format!("{f:?}"),
            r#"UploadFile { name: "a.wav", mime: "audio/wav", size: 3 }"#
        );
    }
}
