//! The domain error taxonomy.
//!
//! Every variant maps to exactly one registered [`ErrorDescriptor`]. The
//! client-facing description is rendered from the variant's typed fields
//! through the descriptor's template, so nothing but those fields can end up
//! in a failure record.

use thiserror::Error;

use super::code::ErrorCode;
use super::descriptor::{ErrorDescriptor, ErrorParams};

fn internal_error(_: &ErrorParams) -> String {
    "An internal error occurred.".to_string()
}

fn resource_immutable(params: &ErrorParams) -> String {
    format!(
        "Cannot update immutable resource {} of type {}",
        params.get("resource_id"),
        params.get("resource_type")
    )
}

fn missing_plugin(params: &ErrorParams) -> String {
    format!(
        "Plugin with app label {} is not installed.",
        params.get("plugin_label")
    )
}

fn digest_validation(params: &ErrorParams) -> String {
    format!(
        "A file located at the url {} failed validation due to checksum. Expected '{}', Actual '{}'",
        params.get("url"),
        params.get("expected"),
        params.get("actual")
    )
}

fn size_validation(params: &ErrorParams) -> String {
    format!(
        "A file located at the url {} failed validation due to size. Expected '{}', Actual '{}'",
        params.get("url"),
        params.get("expected"),
        params.get("actual")
    )
}

fn timeout(params: &ErrorParams) -> String {
    format!(
        "Request timed out for {}. Increasing the timeout value on the remote might help.",
        params.get("url")
    )
}

fn dns_domain_name(_: &ErrorParams) -> String {
    "URL lookup failed.".to_string()
}

fn domain_protected(_: &ErrorParams) -> String {
    "You cannot delete a domain that still contains repositories with content.".to_string()
}

fn url_scheme_not_supported(params: &ErrorParams) -> String {
    format!("URL: {} not supported.", params.get("url"))
}

fn proxy_authentication(params: &ErrorParams) -> String {
    format!(
        "Proxy authentication failed for {}. Please check your proxy credentials.",
        params.get("proxy_url")
    )
}

fn repository_version_delete(_: &ErrorParams) -> String {
    "Cannot delete repository version. Repositories must have at least one repository version."
        .to_string()
}

pub static INTERNAL_ERROR: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::INTERNAL, "InternalError", internal_error);

pub static RESOURCE_IMMUTABLE: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(1), "ResourceImmutableError", resource_immutable)
        .with_status(409);

pub static MISSING_PLUGIN: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(2), "MissingPlugin", missing_plugin);

pub static DIGEST_VALIDATION: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(3), "DigestValidationError", digest_validation);

pub static SIZE_VALIDATION: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(4), "SizeValidationError", size_validation);

pub static TIMEOUT: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(5), "TimeoutException", timeout);

pub static DNS_DOMAIN_NAME: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(6), "DnsDomainNameException", dns_domain_name)
        .with_status(502);

pub static DOMAIN_PROTECTED: ErrorDescriptor =
    ErrorDescriptor::new(ErrorCode::core(7), "DomainProtectedError", domain_protected)
        .with_status(409);

pub static URL_SCHEME_NOT_SUPPORTED: ErrorDescriptor = ErrorDescriptor::new(
    ErrorCode::core(8),
    "UrlSchemeNotSupportedError",
    url_scheme_not_supported,
)
.with_status(400);

pub static PROXY_AUTHENTICATION: ErrorDescriptor = ErrorDescriptor::new(
    ErrorCode::core(9),
    "ProxyAuthenticationError",
    proxy_authentication,
)
.with_status(407);

pub static REPOSITORY_VERSION_DELETE: ErrorDescriptor = ErrorDescriptor::new(
    ErrorCode::core(10),
    "RepositoryVersionDeleteError",
    repository_version_delete,
)
.with_status(409);

/// Descriptors for every core variant, in code order.
pub static BUILTIN_DESCRIPTORS: [&ErrorDescriptor; 11] = [
    &INTERNAL_ERROR,
    &RESOURCE_IMMUTABLE,
    &MISSING_PLUGIN,
    &DIGEST_VALIDATION,
    &SIZE_VALIDATION,
    &TIMEOUT,
    &DNS_DOMAIN_NAME,
    &DOMAIN_PROTECTED,
    &URL_SCHEME_NOT_SUPPORTED,
    &PROXY_AUTHENTICATION,
    &REPOSITORY_VERSION_DELETE,
];

/// Domain errors - known failure conditions with a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{}", self.description())]
    Internal,

    #[error("{}", self.description())]
    ResourceImmutable {
        resource_id: String,
        resource_type: String,
    },

    #[error("{}", self.description())]
    MissingPlugin {
        plugin_label: String,
    },

    #[error("{}", self.description())]
    DigestValidation {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("{}", self.description())]
    SizeValidation {
        url: String,
        expected: u64,
        actual: u64,
    },

    #[error("{}", self.description())]
    Timeout {
        url: String,
    },

    #[error("{}", self.description())]
    DnsDomainName {
        url: String,
    },

    #[error("{}", self.description())]
    DomainProtected,

    #[error("{}", self.description())]
    UrlSchemeNotSupported {
        url: String,
    },

    #[error("{}", self.description())]
    ProxyAuthentication {
        proxy_url: String,
    },

    #[error("{}", self.description())]
    RepositoryVersionDelete,

    /// A kind registered by a content module at start-up.
    #[error("{}", self.description())]
    Plugin(PluginError),
}

impl DomainError {
    pub fn descriptor(&self) -> &'static ErrorDescriptor {
        match self {
            DomainError::Internal => &INTERNAL_ERROR,
            DomainError::ResourceImmutable { .. } => &RESOURCE_IMMUTABLE,
            DomainError::MissingPlugin { .. } => &MISSING_PLUGIN,
            DomainError::DigestValidation { .. } => &DIGEST_VALIDATION,
            DomainError::SizeValidation { .. } => &SIZE_VALIDATION,
            DomainError::Timeout { .. } => &TIMEOUT,
            DomainError::DnsDomainName { .. } => &DNS_DOMAIN_NAME,
            DomainError::DomainProtected => &DOMAIN_PROTECTED,
            DomainError::UrlSchemeNotSupported { .. } => &URL_SCHEME_NOT_SUPPORTED,
            DomainError::ProxyAuthentication { .. } => &PROXY_AUTHENTICATION,
            DomainError::RepositoryVersionDelete => &REPOSITORY_VERSION_DELETE,
            DomainError::Plugin(err) => err.descriptor,
        }
    }

    /// Template parameters carried by this instance.
    pub fn params(&self) -> ErrorParams {
        let params = ErrorParams::new();
        match self {
            DomainError::ResourceImmutable {
                resource_id,
                resource_type,
            } => params
                .with("resource_id", resource_id)
                .with("resource_type", resource_type),
            DomainError::MissingPlugin { plugin_label } => {
                params.with("plugin_label", plugin_label)
            }
            DomainError::DigestValidation {
                url,
                expected,
                actual,
            } => params
                .with("url", url)
                .with("expected", expected)
                .with("actual", actual),
            DomainError::SizeValidation {
                url,
                expected,
                actual,
            } => params
                .with("url", url)
                .with("expected", expected)
                .with("actual", actual),
            DomainError::Timeout { url }
            | DomainError::DnsDomainName { url }
            | DomainError::UrlSchemeNotSupported { url } => params.with("url", url),
            DomainError::ProxyAuthentication { proxy_url } => params.with("proxy_url", proxy_url),
            DomainError::Plugin(err) => err.params.clone(),
            DomainError::Internal
            | DomainError::DomainProtected
            | DomainError::RepositoryVersionDelete => params,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.descriptor().code
    }

    pub fn http_status(&self) -> u16 {
        self.descriptor().http_status
    }

    /// Client-safe description, rendered from the descriptor template.
    pub fn description(&self) -> String {
        self.descriptor().render(&self.params())
    }
}

/// An instance of a kind defined outside depot-core.
#[derive(Debug, Clone)]
pub struct PluginError {
    descriptor: &'static ErrorDescriptor,
    params: ErrorParams,
}

impl PluginError {
    pub fn new(descriptor: &'static ErrorDescriptor, params: ErrorParams) -> Self {
        Self { descriptor, params }
    }

    pub fn descriptor(&self) -> &'static ErrorDescriptor {
        self.descriptor
    }

    pub fn params(&self) -> &ErrorParams {
        &self.params
    }
}

impl PartialEq for PluginError {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.descriptor, other.descriptor) && self.params == other.params
    }
}

impl Eq for PluginError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes_are_sequential() {
        for (number, descriptor) in BUILTIN_DESCRIPTORS.iter().enumerate() {
            assert_eq!(descriptor.code, ErrorCode::core(number as u16));
        }
    }

    #[test]
    fn test_digest_description() {
        let err = DomainError::DigestValidation {
            url: "https://x/file".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert_eq!(err.code().to_string(), "DPT0003");
        assert_eq!(err.http_status(), 500);
        assert_eq!(
            err.to_string(),
            "A file located at the url https://x/file failed validation due to checksum. \
             Expected 'abc123', Actual 'def456'"
        );
    }

    #[test]
    fn test_display_is_the_description() {
        let err = DomainError::DomainProtected;
        assert_eq!(err.to_string(), err.description());
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_size_description() {
        let err = DomainError::SizeValidation {
            url: "https://x/file".to_string(),
            expected: 10,
            actual: 7,
        };
        assert_eq!(
            err.description(),
            "A file located at the url https://x/file failed validation due to size. \
             Expected '10', Actual '7'"
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Internal, 500),
            (
                DomainError::ResourceImmutable {
                    resource_id: "1".to_string(),
                    resource_type: "repository".to_string(),
                },
                409,
            ),
            (
                DomainError::MissingPlugin {
                    plugin_label: "rpm".to_string(),
                },
                500,
            ),
            (
                DomainError::Timeout {
                    url: "https://x".to_string(),
                },
                500,
            ),
            (
                DomainError::DnsDomainName {
                    url: "https://x".to_string(),
                },
                502,
            ),
            (DomainError::DomainProtected, 409),
            (
                DomainError::UrlSchemeNotSupported {
                    url: "ftp://x".to_string(),
                },
                400,
            ),
            (
                DomainError::ProxyAuthentication {
                    proxy_url: "http://proxy:3128".to_string(),
                },
                407,
            ),
            (DomainError::RepositoryVersionDelete, 409),
        ];

        for (err, status) in cases {
            assert_eq!(err.http_status(), status, "{}", err.descriptor().name);
        }
    }

    #[test]
    fn test_fixed_templates() {
        assert_eq!(
            DomainError::Internal.description(),
            "An internal error occurred."
        );
        assert_eq!(
            DomainError::DnsDomainName {
                url: "https://secret.example".to_string()
            }
            .description(),
            "URL lookup failed."
        );
        assert_eq!(
            DomainError::UrlSchemeNotSupported {
                url: "ftp://x".to_string()
            }
            .description(),
            "URL: ftp://x not supported."
        );
        assert_eq!(
            DomainError::ResourceImmutable {
                resource_id: "42".to_string(),
                resource_type: "artifact".to_string(),
            }
            .description(),
            "Cannot update immutable resource 42 of type artifact"
        );
    }

    fn rpm_sync(params: &ErrorParams) -> String {
        format!("Sync of {} failed.", params.get("remote"))
    }

    static RPM_SYNC: ErrorDescriptor =
        ErrorDescriptor::new(ErrorCode::new("RPM", 1), "RpmSyncError", rpm_sync).with_status(422);

    #[test]
    fn test_plugin_errors_use_their_descriptor() {
        let err = RPM_SYNC.instance(ErrorParams::new().with("remote", "fedora"));
        assert_eq!(err.code().to_string(), "RPM0001");
        assert_eq!(err.http_status(), 422);
        assert_eq!(err.description(), "Sync of fedora failed.");
        assert_eq!(err, RPM_SYNC.instance(ErrorParams::new().with("remote", "fedora")));
    }
}
