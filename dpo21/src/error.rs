//!
//! # Dpo21 Result and Error Types
//!

// Local Imports
use crate::data::{NodeBuilderError, Orientation, RowBuilderError};
use crate::utils;

/// # [DpoError] Result Type
pub type DpoResult<T> = Result<T, DpoError>;

///
/// # Detailed-Placement Error Enumeration
///
/// Note the orientation and flip passes themselves never fail;
/// they report unresolved cells as counts.
/// These errors arise from the primitives they are built on, and from loading and checking designs.
///
pub enum DpoError {
    /// Orientation transform involving a rotated (non-mirror) state
    Orientation {
        node: String,
        from: Orientation,
        to: Orientation,
    },
    /// Invalid design data
    Validation {
        message: String,
        stack: Vec<ErrorContext>,
    },
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl DpoError {
    /// Create a [DpoError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [DpoError::Str] variant from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
}
impl std::fmt::Debug for DpoError {
    /// Display a [DpoError]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DpoError::Orientation { node, from, to } => write!(
                f,
                "Orientation Error: \n - cannot transform {} from {} to {}",
                node, from, to
            ),
            DpoError::Validation { message, stack } => {
                write!(f, "Validation Error: \n - {} \n - {:?}", message, stack)
            }
            DpoError::Boxed(err) => write!(f, "{}", err),
            DpoError::Str(err) => write!(f, "{}", err),
        }
    }
}
impl std::fmt::Display for DpoError {
    /// Display a [DpoError]
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for DpoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}
impl From<String> for DpoError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for DpoError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<utils::ser::Error> for DpoError {
    fn from(e: utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<NodeBuilderError> for DpoError {
    fn from(e: NodeBuilderError) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<RowBuilderError> for DpoError {
    fn from(e: RowBuilderError) -> Self {
        Self::Boxed(Box::new(e))
    }
}

/// Enumerated design-entity contexts
/// Generally used for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorContext {
    Design(String),
    Segment(usize),
    Node(String),
    SpacingTable,
}
