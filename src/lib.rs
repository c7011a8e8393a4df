//! Orrery renders an animated "galaxy of projects" presentation headlessly.
//!
//! Projects are star systems orbiting a pulsing galaxy center. Clicking one flies through a
//! hyperspeed transition into that project's solar system; the center opens an about view.
//!
//! - Load content into a [`ProjectCatalog`] and an [`AboutRecord`]
//! - Drive a [`Presentation`] with display callbacks and pointer/lifecycle events
//! - Rasterize frames with a [`RenderBackend`] and stream them into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Tunables, loadable from JSON.
pub mod config;
/// Presentation content.
pub mod data;
/// Frame output sinks.
pub mod encode;
/// Hit-testable scene entities.
pub mod entity;
/// Geometry, colors, errors and randomness shared by every module.
pub mod foundation;
/// Galaxy particle layers.
pub mod particles;
/// Draw recording and rasterization.
pub mod render;
/// Frame driver, input gates and script replay.
pub mod runtime;
/// Scenes and the transition effect.
pub mod scene;
/// View state machine and routing.
pub mod state;

pub use crate::config::PresentationOpts;
pub use crate::data::load::{load_about, load_catalog};
pub use crate::data::model::{AboutRecord, ProjectCatalog, ProjectRecord};
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Point, Viewport};
pub use crate::foundation::error::{OrreryError, OrreryResult};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
pub use crate::runtime::presentation::Presentation;
pub use crate::runtime::script::{Script, run_script};
pub use crate::state::machine::{AppState, ViewStateMachine};
pub use crate::state::route::Route;
