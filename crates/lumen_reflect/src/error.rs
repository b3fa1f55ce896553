//! Error types for class registration

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors surfaced by the class registry
///
/// Lookup misses are `Option::None` by contract; only operations that would
/// otherwise corrupt or silently overwrite registry state return errors.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Two classes registered under the same qualified name
    #[error("Class '{0}' already registered")]
    DuplicateClass(String),

    /// Instantiation requested for a name that is not registered
    #[error("Class '{0}' not registered")]
    UnknownClass(String),

    /// Instantiation requested for a class without a factory
    #[error("Class '{0}' has no default constructor")]
    NotConstructible(String),
}
