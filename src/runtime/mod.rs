//! Frame driver.
//!
//! A [`presentation::Presentation`] stands in for the browser host: it receives display
//! callbacks, pointer and lifecycle events, and a [`script::Script`] replays a recorded
//! timeline of those events into a frame sink.

/// Frame cap, throttle and debounce.
pub mod clock;
/// Host-facing driver.
pub mod presentation;
/// Scripted event replay.
pub mod script;
