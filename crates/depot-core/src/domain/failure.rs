use serde::{Deserialize, Serialize};

use crate::error::taxonomy::INTERNAL_ERROR;
use crate::error::{DomainError, ErrorDescriptor, ErrorParams};

/// The sanitized description of a failed task.
///
/// This is the only failure artifact handed to API clients. Its description
/// always comes from a descriptor template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub code: String,
    pub description: String,
    pub http_status: u16,
}

impl FailureRecord {
    pub fn from_descriptor(descriptor: &ErrorDescriptor, params: &ErrorParams) -> Self {
        Self {
            code: descriptor.code.to_string(),
            description: descriptor.render(params),
            http_status: descriptor.http_status,
        }
    }

    /// The record for anything that is not a registered domain error.
    pub fn internal() -> Self {
        Self::from_descriptor(&INTERNAL_ERROR, &ErrorParams::new())
    }

    pub fn is_internal(&self) -> bool {
        self.code == INTERNAL_ERROR.code.to_string()
    }
}

impl From<&DomainError> for FailureRecord {
    fn from(err: &DomainError) -> Self {
        Self::from_descriptor(err.descriptor(), &err.params())
    }
}
