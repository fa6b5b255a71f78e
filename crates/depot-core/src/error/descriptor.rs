//! Error descriptors and the structured parameters their templates consume.

use std::fmt;

use super::code::ErrorCode;
use super::taxonomy::{DomainError, PluginError};

/// Renders a client-safe description from named parameters.
pub type Template = fn(&ErrorParams) -> String;

/// Static metadata for one kind of domain error.
///
/// Descriptors live in `static` items and are registered by reference, so
/// every instance of a kind points at the same descriptor.
#[derive(Clone, Copy)]
pub struct ErrorDescriptor {
    pub code: ErrorCode,
    pub name: &'static str,
    pub http_status: u16,
    pub template: Template,
}

impl ErrorDescriptor {
    pub const DEFAULT_HTTP_STATUS: u16 = 500;

    /// Create a descriptor with the default HTTP status.
    pub const fn new(code: ErrorCode, name: &'static str, template: Template) -> Self {
        Self {
            code,
            name,
            http_status: Self::DEFAULT_HTTP_STATUS,
            template,
        }
    }

    pub const fn with_status(self, http_status: u16) -> Self {
        Self {
            http_status,
            ..self
        }
    }

    /// Render the description for a set of parameters.
    pub fn render(&self, params: &ErrorParams) -> String {
        (self.template)(params)
    }

    /// Build a domain error of this kind. Used by modules that register
    /// their own descriptors.
    pub fn instance(&'static self, params: ErrorParams) -> DomainError {
        DomainError::Plugin(PluginError::new(self, params))
    }
}

impl fmt::Debug for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorDescriptor")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("http_status", &self.http_status)
            .finish_non_exhaustive()
    }
}

/// Named, ordered template parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorParams(Vec<(&'static str, String)>);

impl ErrorParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a parameter.
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }

    /// Value of a parameter, or an empty string when it is missing.
    pub fn get(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
