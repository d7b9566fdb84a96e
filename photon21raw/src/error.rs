//!
//! # Layout Result and Error Types
//!
//! Shared by every photon21 crate.
//! Geometry failures, configuration mismatches, and lookup failures at the
//! technology boundary all arrive here as variants of [LayoutError].
//!

/// # [LayoutError] Result Type
pub type LayoutResult<T> = Result<T, LayoutError>;

///
/// # Layout Error Enumeration
///
pub enum LayoutError {
    /// Zero-length segments, duplicate consecutive points,
    /// or fewer points than an operation requires
    DegenerateInput(String),
    /// Normalization of a zero-length vector
    DivideByZero,
    /// Layer, width, and offset lists of differing lengths, and similar caller programming errors
    ConfigurationMismatch(String),
    /// An iterative solver exceeded its iteration cap.
    /// Carries the last estimate for diagnostics.
    NumericNonConvergence {
        message: String,
        iterations: usize,
        last: f64,
    },
    /// Rejected generator parameters
    Validation(String),
    /// Failed lookup of a layer, waveguide type, or other technology entry
    Lookup(String),
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl LayoutError {
    /// Create a [LayoutError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [LayoutError::Str] variant,
    /// from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
    /// Create a [LayoutError::DegenerateInput]
    pub fn degenerate(s: impl Into<String>) -> Self {
        Self::DegenerateInput(s.into())
    }
    /// Create a [LayoutError::ConfigurationMismatch]
    pub fn mismatch(s: impl Into<String>) -> Self {
        Self::ConfigurationMismatch(s.into())
    }
    /// Create a [LayoutError::Lookup]
    pub fn lookup(s: impl Into<String>) -> Self {
        Self::Lookup(s.into())
    }
}
impl std::fmt::Debug for LayoutError {
    /// Display a [LayoutError]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LayoutError::DegenerateInput(msg) => write!(f, "Degenerate Input: {}", msg),
            LayoutError::DivideByZero => {
                write!(f, "Divide By Zero: normalizing a zero-length vector")
            }
            LayoutError::ConfigurationMismatch(msg) => {
                write!(f, "Configuration Mismatch: {}", msg)
            }
            LayoutError::NumericNonConvergence {
                message,
                iterations,
                last,
            } => write!(
                f,
                "Numeric Non-Convergence: \n - {} \n - after {} iterations, last estimate {}",
                message, iterations, last
            ),
            LayoutError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            LayoutError::Lookup(msg) => write!(f, "Lookup Error: {}", msg),
            LayoutError::Boxed(err) => err.fmt(f),
            LayoutError::Str(err) => err.fmt(f),
        }
    }
}
impl std::fmt::Display for LayoutError {
    /// Display a [LayoutError]
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<String> for LayoutError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for LayoutError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<std::num::TryFromIntError> for LayoutError {
    fn from(e: std::num::TryFromIntError) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<crate::ser::Error> for LayoutError {
    fn from(e: crate::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}

///
/// # ErrorHelper
///
/// Helper trait for generators and other stateful producers of [LayoutError]s.
/// Implementers inject their own context (generally a cell name) in the required `err` method.
/// The `fail`, `unwrap`, and `assert` methods are provided by default.
///
pub trait ErrorHelper {
    /// Create and return a [LayoutError]
    fn err(&self, msg: impl Into<String>) -> LayoutError;
    /// Return failure
    fn fail<T>(&self, msg: impl Into<String>) -> LayoutResult<T> {
        Err(self.err(msg))
    }
    /// Unwrap the [Option] `opt` if it is [Some], and return our error if not.
    fn unwrap<T>(&self, opt: Option<T>, msg: impl Into<String>) -> LayoutResult<T> {
        match opt {
            Some(val) => Ok(val),
            None => self.fail(msg),
        }
    }
    /// Assert a boolean condition. Returns through `self.fail` if it is not satisfied.
    fn assert(&self, b: bool, msg: impl Into<String>) -> LayoutResult<()> {
        match b {
            true => Ok(()),
            false => self.fail(msg),
        }
    }
}
