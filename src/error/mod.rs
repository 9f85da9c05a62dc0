//! Error handling for cardstack.
//!
//! - **Error Categories**: how a failure is reported to the user
//! - **Unified Error Type**: `CardStackError` for config, CLI and terminal failures
//! - **Result Type Alias**: `CardStackResult<T>`
//!
//! The widget core in [`crate::stack`] has no error paths. Invalid settings are
//! clamped and null content becomes an empty slot, so nothing here crosses the
//! widget boundary.
//!
//! | Category | Description |
//! |----------|-------------|
//! | User | Bad command-line arguments |
//! | Configuration | Unreadable or malformed config file |
//! | Terminal | Terminal setup/teardown failed |
//! | System | OS/filesystem errors |

mod cardstack_error;
mod category;
mod result;

pub use cardstack_error::CardStackError;
pub use category::ErrorCategory;
pub use result::CardStackResult;
