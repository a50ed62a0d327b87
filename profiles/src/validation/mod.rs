//! Input schemas for the user endpoints.
//!
//! Each shape is parsed by a pure function returning either the typed value or a
//! [`ValidationErrors`] report listing every violated field.

mod lookup_params;
mod new_user;
mod report;

pub use lookup_params::LookupParams;
pub use new_user::NewUser;
pub use report::{Issue, IssueCode, ValidationErrors};
