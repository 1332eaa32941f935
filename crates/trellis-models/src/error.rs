//! Registry error types

use thiserror::Error;

/// Violations of the registry's structural invariants.
///
/// These are build defects in the shipped catalog, not runtime conditions:
/// tests assert they cannot occur against the static data, and production
/// callers propagate them rather than recover.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no default model declared in the registry")]
    MissingDefault,

    #[error("multiple default models declared: {first} and {second}")]
    MultipleDefaults {
        first: &'static str,
        second: &'static str,
    },

    #[error("deprecated model {id} has no replacement")]
    MissingReplacement { id: &'static str },

    #[error("model {id} is replaced by unknown id {replaced_by}")]
    UnknownReplacement {
        id: &'static str,
        replaced_by: &'static str,
    },

    #[error("replacement chain cycles back through {id}")]
    ReplacementCycle { id: &'static str },
}
