//! Curry chain configuration.

use serde::{Deserialize, Serialize};

/// How variadic signatures take part in the whole-pack check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariadicPolicy {
    /// A variadic signature never completes a chain by argument count alone.
    /// The caller ends accumulation with a final-argument marker.
    #[default]
    Deferred,
    /// A variadic signature completes the chain as soon as its fixed
    /// parameters are filled.
    Eager,
}

/// Chain configuration.
///
/// Set once by `curry_with` and inherited by every accumulator of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurryConfig {
    /// Variadic signature handling.
    pub variadic: VariadicPolicy,
}

impl CurryConfig {
    /// Configuration with eager variadic completion.
    #[must_use]
    pub const fn eager() -> Self {
        Self {
            variadic: VariadicPolicy::Eager,
        }
    }
}
