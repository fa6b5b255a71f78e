//! Process-wide error code registry.
//!
//! Descriptors are collected by a [`RegistryBuilder`] during start-up, frozen
//! into an [`ErrorRegistry`] and installed once. After [`install`] the
//! registry is read-only, so readers never need a lock.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use super::code::ErrorCode;
use super::descriptor::ErrorDescriptor;
use super::taxonomy::{BUILTIN_DESCRIPTORS, INTERNAL_ERROR};

/// Registry construction errors. All of them are fatal at start-up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate error code {code}: {conflicting} conflicts with {existing}")]
    DuplicateCode {
        code: ErrorCode,
        existing: &'static str,
        conflicting: &'static str,
    },

    #[error("Error registry is already installed")]
    AlreadyInstalled,
}

/// Collects descriptors before the registry is frozen.
#[derive(Debug)]
pub struct RegistryBuilder {
    descriptors: BTreeMap<ErrorCode, &'static ErrorDescriptor>,
}

impl RegistryBuilder {
    /// A builder holding only the internal-error fallback.
    pub fn new() -> Self {
        let mut descriptors = BTreeMap::new();
        descriptors.insert(INTERNAL_ERROR.code, &INTERNAL_ERROR);
        Self { descriptors }
    }

    /// A builder holding every core descriptor.
    pub fn with_builtins() -> Self {
        let mut descriptors = BTreeMap::new();
        for descriptor in BUILTIN_DESCRIPTORS {
            descriptors.insert(descriptor.code, descriptor);
        }
        Self { descriptors }
    }

    /// Register a descriptor. Registering the very same descriptor twice is a
    /// no-op; a different descriptor under a taken code is rejected.
    pub fn register(mut self, descriptor: &'static ErrorDescriptor) -> Result<Self, RegistryError> {
        if let Some(existing) = self.descriptors.get(&descriptor.code) {
            if std::ptr::eq(*existing, descriptor) {
                return Ok(self);
            }
            return Err(RegistryError::DuplicateCode {
                code: descriptor.code,
                existing: existing.name,
                conflicting: descriptor.name,
            });
        }

        self.descriptors.insert(descriptor.code, descriptor);
        Ok(self)
    }

    pub fn register_all<I>(self, descriptors: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'static ErrorDescriptor>,
    {
        descriptors
            .into_iter()
            .try_fold(self, |builder, descriptor| builder.register(descriptor))
    }

    /// Freeze the collected descriptors.
    pub fn build(self) -> ErrorRegistry {
        ErrorRegistry {
            descriptors: self.descriptors,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen code table.
#[derive(Debug)]
pub struct ErrorRegistry {
    descriptors: BTreeMap<ErrorCode, &'static ErrorDescriptor>,
}

impl ErrorRegistry {
    /// Registry with the core descriptors only.
    pub fn builtin() -> Self {
        RegistryBuilder::with_builtins().build()
    }

    pub fn lookup(&self, code: ErrorCode) -> Option<&'static ErrorDescriptor> {
        self.descriptors.get(&code).copied()
    }

    /// Look up by the rendered form, e.g. `DPT0003`.
    pub fn lookup_str(&self, code: &str) -> Option<&'static ErrorDescriptor> {
        self.descriptors
            .iter()
            .find(|(key, _)| key.to_string() == code)
            .map(|(_, descriptor)| *descriptor)
    }

    /// Whether this exact descriptor is the one registered for its code.
    pub fn is_registered(&self, descriptor: &ErrorDescriptor) -> bool {
        self.lookup(descriptor.code)
            .is_some_and(|registered| std::ptr::eq(registered, descriptor))
    }

    /// The fallback used for anything that cannot be classified.
    pub fn internal(&self) -> &'static ErrorDescriptor {
        &INTERNAL_ERROR
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ErrorDescriptor> + '_ {
        self.descriptors.values().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

static GLOBAL: OnceLock<Arc<ErrorRegistry>> = OnceLock::new();

/// Install the process-wide registry. Must be called once, before any task
/// runs; a second call fails.
pub fn install(registry: ErrorRegistry) -> Result<Arc<ErrorRegistry>, RegistryError> {
    let registry = Arc::new(registry);
    GLOBAL
        .set(registry.clone())
        .map_err(|_| RegistryError::AlreadyInstalled)?;

    tracing::info!(codes = registry.len(), "Error registry installed");
    Ok(registry)
}

/// The installed registry, if start-up has completed.
pub fn installed() -> Option<Arc<ErrorRegistry>> {
    GLOBAL.get().cloned()
}
