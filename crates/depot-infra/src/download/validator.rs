//! Streaming size and checksum validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use depot_core::DomainError;

use super::location::redact_url;

/// Checksum algorithms the validator can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

/// What the downloaded content is expected to look like.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedContent {
    #[serde(default)]
    pub size: Option<u64>,
    /// Lowercase hex digests by algorithm.
    #[serde(default)]
    pub digests: BTreeMap<DigestAlgorithm, String>,
}

impl ExpectedContent {
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_digest(mut self, algorithm: DigestAlgorithm, hex: impl Into<String>) -> Self {
        self.digests.insert(algorithm, hex.into());
        self
    }
}

/// Facts about content that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub size: u64,
    pub digests: BTreeMap<DigestAlgorithm, String>,
}

/// Computes size and digests chunk by chunk, then checks them.
///
/// SHA-256 is always computed; SHA-512 only when it is expected.
pub struct DownloadValidator {
    url: String,
    expected: ExpectedContent,
    size: u64,
    sha256: Sha256,
    sha512: Option<Sha512>,
}

impl DownloadValidator {
    pub fn new(url: &str, expected: ExpectedContent) -> Self {
        let sha512 = expected
            .digests
            .contains_key(&DigestAlgorithm::Sha512)
            .then(Sha512::new);

        Self {
            url: redact_url(url),
            expected,
            size: 0,
            sha256: Sha256::new(),
            sha512,
        }
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.size += chunk.len() as u64;
        self.sha256.update(chunk);
        if let Some(sha512) = self.sha512.as_mut() {
            sha512.update(chunk);
        }
    }

    /// Check the content seen so far. Size is checked before digests.
    pub fn finish(self) -> Result<DownloadResult, DomainError> {
        if let Some(expected) = self.expected.size {
            if expected != self.size {
                return Err(DomainError::SizeValidation {
                    url: self.url,
                    expected,
                    actual: self.size,
                });
            }
        }

        let mut digests = BTreeMap::new();
        digests.insert(DigestAlgorithm::Sha256, hex::encode(self.sha256.finalize()));
        if let Some(sha512) = self.sha512 {
            digests.insert(DigestAlgorithm::Sha512, hex::encode(sha512.finalize()));
        }

        for (algorithm, expected) in &self.expected.digests {
            let actual = &digests[algorithm];
            if !expected.eq_ignore_ascii_case(actual) {
                return Err(DomainError::DigestValidation {
                    url: self.url,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }

        Ok(DownloadResult {
            size: self.size,
            digests,
        })
    }
}
