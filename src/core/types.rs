use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Trailing characters that are corpus formatting, not part of an address.
const TRAILING_ARTIFACTS: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"', '*', '>'];

/// Strip trailing punctuation, quote and bracket characters from a raw match.
///
/// # Examples
/// ```
/// use doclinks::core::types::normalize_url;
///
/// assert_eq!(normalize_url("https://docs.rs/serde."), "https://docs.rs/serde");
/// assert_eq!(normalize_url("https://docs.rs/serde\"],"), "https://docs.rs/serde");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let mut url = raw;
    loop {
        let trimmed = url.trim_end_matches(TRAILING_ARTIFACTS);
        // A closing bracket only belongs to the URL when it closes a placeholder
        let trimmed = match trimmed.chars().last() {
            Some(']') if !trimmed.contains('[') => &trimmed[..trimmed.len() - 1],
            Some('}') if !trimmed.contains('{') => &trimmed[..trimmed.len() - 1],
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url.to_string();
        }
        url = trimmed;
    }
}

/// A unique URL discovered in the corpus.
///
/// Records are created once per run and never mutated after the corpus is
/// loaded. Equality and ordering only consider `normalized`, which is the
/// deduplication key.
#[derive(Debug, Eq, Clone)]
pub struct UrlRecord {
    /// The exact substring first captured from the corpus
    pub raw: String,
    /// `raw` without trailing formatting artifacts
    pub normalized: String,
    /// Corpus files this URL was found in
    pub source_files: BTreeSet<String>,
}

impl UrlRecord {
    /// Create a record for a URL found in `source_file`.
    pub fn new<R: Into<String>, S: Into<String>>(raw: R, source_file: S) -> Self {
        let raw = raw.into();
        let normalized = normalize_url(&raw);
        let mut source_files = BTreeSet::new();
        source_files.insert(source_file.into());

        Self {
            raw,
            normalized,
            source_files,
        }
    }

    /// Record that the same normalized URL also appears in `source_file`.
    pub(crate) fn add_source<S: Into<String>>(&mut self, source_file: S) {
        self.source_files.insert(source_file.into());
    }

    pub fn url(&self) -> &str {
        &self.normalized
    }
}

impl Ord for UrlRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl PartialOrd for UrlRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for UrlRecord {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

/// Why a URL was never probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExemptReason {
    /// Contains a parameter placeholder such as `{id}` or `[projectId]`
    Template,
    /// Hosted on a conventional stand-in domain such as `example.com`
    ExampleDomain,
}

/// The result of classifying or probing one [`UrlRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exempt {
        reason: ExemptReason,
    },
    /// Probe completed with a 2xx status. `final_url` differs from the
    /// requested URL only when at least one redirect was followed.
    Live {
        status_code: u16,
        final_url: String,
    },
    ClientError {
        status_code: u16,
        reason_phrase: String,
    },
    ServerError {
        status_code: u16,
        reason_phrase: String,
    },
    /// No usable status line was obtained (DNS, TLS, refused, timeout...)
    TransportError {
        message: String,
    },
}

impl Outcome {
    /// Map this outcome onto its report bucket.
    ///
    /// `requested` is the normalized URL that was probed; a `Live` outcome
    /// whose final URL differs from it counts as redirected.
    pub fn bucket(&self, requested: &str) -> Bucket {
        match self {
            Outcome::Exempt {
                reason: ExemptReason::Template,
            } => Bucket::ExemptTemplate,
            Outcome::Exempt {
                reason: ExemptReason::ExampleDomain,
            } => Bucket::ExemptExample,
            Outcome::Live { final_url, .. } if final_url != requested => Bucket::Redirected,
            Outcome::Live { .. } => Bucket::Valid,
            Outcome::ClientError { .. } | Outcome::ServerError { .. } => Bucket::Broken,
            Outcome::TransportError { .. } => Bucket::TransportError,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Outcome::Live { status_code, .. }
            | Outcome::ClientError { status_code, .. }
            | Outcome::ServerError { status_code, .. } => Some(*status_code),
            Outcome::Exempt { .. } | Outcome::TransportError { .. } => None,
        }
    }

    /// Human readable detail: redirect target, reason phrase or error message.
    pub fn detail(&self, requested: &str) -> String {
        match self {
            Outcome::Exempt {
                reason: ExemptReason::Template,
            } => "template placeholder".to_string(),
            Outcome::Exempt {
                reason: ExemptReason::ExampleDomain,
            } => "example domain".to_string(),
            Outcome::Live { final_url, .. } if final_url != requested => final_url.clone(),
            Outcome::Live { .. } => "OK".to_string(),
            Outcome::ClientError { reason_phrase, .. }
            | Outcome::ServerError { reason_phrase, .. } => reason_phrase.clone(),
            Outcome::TransportError { message } => message.clone(),
        }
    }
}

/// Fixed outcome taxonomy. Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "valid")]
    Valid,
    #[serde(rename = "redirected")]
    Redirected,
    #[serde(rename = "broken")]
    Broken,
    #[serde(rename = "exempt-template")]
    ExemptTemplate,
    #[serde(rename = "exempt-example")]
    ExemptExample,
    #[serde(rename = "transportError")]
    TransportError,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Valid,
        Bucket::Redirected,
        Bucket::Broken,
        Bucket::ExemptTemplate,
        Bucket::ExemptExample,
        Bucket::TransportError,
    ];

    /// Buckets whose entries need a human to look at them, most urgent first.
    pub const ACTIONABLE: [Bucket; 3] =
        [Bucket::Broken, Bucket::Redirected, Bucket::TransportError];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Valid => "valid",
            Bucket::Redirected => "redirected",
            Bucket::Broken => "broken",
            Bucket::ExemptTemplate => "exempt-template",
            Bucket::ExemptExample => "exempt-example",
            Bucket::TransportError => "transportError",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_normalize_url__strips_trailing_artifacts() {
        assert_eq!(normalize_url("https://a.io/x."), "https://a.io/x");
        assert_eq!(normalize_url("https://a.io/x',"), "https://a.io/x");
        assert_eq!(normalize_url("https://a.io/x>"), "https://a.io/x");
        assert_eq!(normalize_url("https://a.io/x**"), "https://a.io/x");
        assert_eq!(normalize_url("https://a.io/x"), "https://a.io/x");
    }

    #[test]
    fn test_normalize_url__keeps_balanced_placeholders() {
        assert_eq!(
            normalize_url("https://api.example.org/v1/projects/[projectId]"),
            "https://api.example.org/v1/projects/[projectId]"
        );
        assert_eq!(normalize_url("https://a.io/{id}."), "https://a.io/{id}");
        assert_eq!(normalize_url("https://a.io/x]."), "https://a.io/x");
    }

    #[test]
    fn test_normalize_url__keeps_inner_punctuation() {
        assert_eq!(
            normalize_url("https://a.io/v1.2/path?q=1;b=2"),
            "https://a.io/v1.2/path?q=1;b=2"
        );
    }

    #[test]
    fn test_url_record__equality_uses_normalized_url() {
        let first = UrlRecord::new("https://a.io/x.", "one.md");
        let second = UrlRecord::new("https://a.io/x", "two.md");

        assert_eq!(first, second);
        assert_eq!(first.url(), "https://a.io/x");
        assert_eq!(first.raw, "https://a.io/x.");
    }

    #[test]
    fn test_url_record__add_source() {
        let mut record = UrlRecord::new("https://a.io", "b.md");
        record.add_source("a.md");
        record.add_source("b.md");

        let sources: Vec<&str> = record.source_files.iter().map(String::as_str).collect();
        assert_eq!(sources, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_url_record__ordering() {
        let a = UrlRecord::new("https://a.com", "file.md");
        let b = UrlRecord::new("https://b.com", "file.md");

        assert!(a < b);
    }

    #[test]
    fn test_outcome_bucket__live_same_url_is_valid() {
        let outcome = Outcome::Live {
            status_code: 200,
            final_url: "https://a.io/".to_string(),
        };

        assert_eq!(outcome.bucket("https://a.io/"), Bucket::Valid);
        assert_eq!(outcome.detail("https://a.io/"), "OK");
    }

    #[test]
    fn test_outcome_bucket__live_other_url_is_redirected() {
        let outcome = Outcome::Live {
            status_code: 200,
            final_url: "https://b.io/".to_string(),
        };

        assert_eq!(outcome.bucket("https://a.io/"), Bucket::Redirected);
        assert_eq!(outcome.detail("https://a.io/"), "https://b.io/");
    }

    #[test]
    fn test_outcome_bucket__errors() {
        let client = Outcome::ClientError {
            status_code: 404,
            reason_phrase: "Not Found".to_string(),
        };
        let server = Outcome::ServerError {
            status_code: 503,
            reason_phrase: "Service Unavailable".to_string(),
        };
        let transport = Outcome::TransportError {
            message: "dns error".to_string(),
        };

        assert_eq!(client.bucket("u"), Bucket::Broken);
        assert_eq!(server.bucket("u"), Bucket::Broken);
        assert_eq!(transport.bucket("u"), Bucket::TransportError);
        assert_eq!(client.status_code(), Some(404));
        assert_eq!(transport.status_code(), None);
    }

    #[test]
    fn test_outcome_bucket__exempt() {
        let template = Outcome::Exempt {
            reason: ExemptReason::Template,
        };
        let example = Outcome::Exempt {
            reason: ExemptReason::ExampleDomain,
        };

        assert_eq!(template.bucket("u"), Bucket::ExemptTemplate);
        assert_eq!(example.bucket("u"), Bucket::ExemptExample);
    }

    #[test]
    fn test_bucket__order_and_names() {
        let mut shuffled = vec![
            Bucket::TransportError,
            Bucket::Valid,
            Bucket::ExemptExample,
            Bucket::Broken,
            Bucket::ExemptTemplate,
            Bucket::Redirected,
        ];
        shuffled.sort();

        assert_eq!(shuffled, Bucket::ALL.to_vec());
        assert_eq!(
            serde_json::to_string(&Bucket::ExemptTemplate).unwrap(),
            "\"exempt-template\""
        );
        assert_eq!(Bucket::TransportError.to_string(), "transportError");
    }

    #[test]
    fn test_bucket__actionable_excludes_valid_and_exempt() {
        for bucket in [Bucket::Valid, Bucket::ExemptTemplate, Bucket::ExemptExample] {
            assert!(!Bucket::ACTIONABLE.contains(&bucket));
        }
        assert!(Bucket::ACTIONABLE.iter().all(|b| Bucket::ALL.contains(b)));
    }
}
