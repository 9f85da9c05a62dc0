//! Result type alias for fallible cardstack operations.

use super::cardstack_error::CardStackError;

/// Type alias for Results using CardStackError.
pub type CardStackResult<T> = Result<T, CardStackError>;
