//! Content download producer.
//!
//! Raises the download validation errors of the domain taxonomy: digest and
//! size mismatches, timeouts, failed name resolution, proxy authentication
//! failures and unsupported URL schemes. Every error is built from values
//! that are already known to be safe; URLs are stripped of credentials first.

mod deadline;
mod http;
mod location;
mod validator;

pub use deadline::with_deadline;
pub use http::{DownloaderConfig, HttpDownloader};
pub use location::{SUPPORTED_SCHEMES, ensure_supported_scheme, redact_url};
pub use validator::{DigestAlgorithm, DownloadResult, DownloadValidator, ExpectedContent};
