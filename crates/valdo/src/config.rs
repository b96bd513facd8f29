//! Configuration options for validation behavior
//!
//! [`Extra`] controls members beyond the declared ones in objects and tuples.
//! [`ValidationConfig`] bounds untrusted input before it reaches a validator.

use crate::validators::Validator;

// ============================================================================
// Extra Member Handling
// ============================================================================

/// How to handle object properties or tuple items that are not declared
#[derive(Debug, Clone, Default)]
pub enum Extra {
    /// Extra members are a validation error (default)
    #[default]
    Forbid,
    /// Extra members are accepted without validation
    Allow,
    /// Extra members are accepted if they pass the validator
    Validate(Box<Validator>),
}

impl Extra {
    /// Whether undeclared members may be present at all
    pub fn allows_extra(&self) -> bool {
        !matches!(self, Self::Forbid)
    }

    /// Validator for undeclared members, if any
    pub fn validator(&self) -> Option<&Validator> {
        match self {
            Self::Validate(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// Validation Config
// ============================================================================

/// Limits applied by [`crate::validate_with_config`] and
/// [`crate::unmarshal_with_config`]. The default has no limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Reject inputs longer than this many bytes before decoding
    pub max_input_len: Option<usize>,

    /// Reject decoded values nested deeper than this
    pub max_depth: Option<usize>,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(max);
        self
    }
}
