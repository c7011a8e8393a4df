//! The view state machine and path routing.

/// Phase sequencing and scene ownership.
pub mod machine;
/// Routes and history.
pub mod route;
