use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::render::backend::RenderBackend;
use crate::runtime::presentation::Presentation;
use crate::state::route::Route;

/// What happens at a scripted instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Pointer moved.
    PointerMove {
        /// Surface x.
        x: f64,
        /// Surface y.
        y: f64,
    },
    /// Pointer clicked.
    Click {
        /// Surface x.
        x: f64,
        /// Surface y.
        y: f64,
    },
    /// Surface resized.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Page hidden.
    Hidden,
    /// Page visible again.
    Visible,
    /// History back.
    Back,
    /// History forward.
    Forward,
    /// Direct navigation.
    Navigate {
        /// Target path such as `/about`.
        route: String,
    },
}

/// One timed event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    /// Playback time in milliseconds.
    pub at_ms: f64,
    /// The event.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Recorded interaction timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Surface size; the presentation's own viewport is used when absent.
    pub viewport: Option<Viewport>,
    /// Output frames per second.
    pub fps: u32,
    /// Playback length.
    pub duration_ms: f64,
    /// Initial route.
    pub start_route: String,
    /// Events, in any order.
    pub events: Vec<ScriptEvent>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            viewport: None,
            fps: 30,
            duration_ms: 1000.0,
            start_route: "/".to_owned(),
            events: Vec::new(),
        }
    }
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json_str(s: &str) -> OrreryResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Read a script file.
    pub fn from_path(path: &Path) -> OrreryResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject a zero frame rate, a negative length and bad routes or times.
    pub fn validate(&self) -> OrreryResult<()> {
        if self.fps == 0 {
            return Err(OrreryError::validation("script fps must be non-zero"));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(OrreryError::validation(
                "script duration_ms must be finite and >= 0",
            ));
        }
        if let Some(v) = self.viewport {
            Viewport::new(v.width, v.height)?;
        }
        Route::parse(&self.start_route)?;
        for ev in &self.events {
            if !ev.at_ms.is_finite() || ev.at_ms < 0.0 {
                return Err(OrreryError::validation(format!(
                    "event time {} must be finite and >= 0",
                    ev.at_ms
                )));
            }
            match &ev.kind {
                EventKind::Navigate { route } => {
                    Route::parse(route)?;
                }
                EventKind::Resize { width, height } => {
                    Viewport::new(*width, *height)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Number of frames produced; always at least one.
    pub fn frame_count(&self) -> u64 {
        let n = (self.duration_ms * f64::from(self.fps) / 1000.0).round();
        (n as u64).max(1)
    }

    /// Playback time of frame `idx`.
    pub fn frame_time_ms(&self, idx: u64) -> f64 {
        idx as f64 * 1000.0 / f64::from(self.fps)
    }
}

/// Apply one event to a running presentation.
pub fn apply_event(p: &mut Presentation, ev: &ScriptEvent) -> OrreryResult<()> {
    let now = ev.at_ms;
    match &ev.kind {
        EventKind::PointerMove { x, y } => p.pointer_move(Point::new(*x, *y), now),
        EventKind::Click { x, y } => {
            p.click(Point::new(*x, *y));
        }
        EventKind::Resize { width, height } => p.resize(Viewport::new(*width, *height)?, now),
        EventKind::Hidden => p.set_visible(false, now),
        EventKind::Visible => p.set_visible(true, now),
        EventKind::Back => {
            p.back();
        }
        EventKind::Forward => {
            p.forward();
        }
        EventKind::Navigate { route } => {
            p.navigate(&Route::parse(route)?);
        }
    }
    Ok(())
}

/// Replay `script` against `presentation`, pushing one rendered frame per output tick.
///
/// Events due at or before a frame's time are applied before that frame. Returns the number of
/// frames pushed.
#[tracing::instrument(skip_all, fields(fps = script.fps, duration_ms = script.duration_ms))]
pub fn run_script(
    script: &Script,
    presentation: &mut Presentation,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> OrreryResult<u64> {
    script.validate()?;

    if let Some(viewport) = script.viewport {
        presentation.set_viewport(viewport);
    }
    let start = Route::parse(&script.start_route)?;
    presentation.start(&start);

    let mut events: Vec<&ScriptEvent> = script.events.iter().collect();
    events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    let mut pending = events.into_iter().peekable();

    let viewport = presentation.machine().viewport();
    let (width, height) = viewport.pixel_size()?;
    sink.begin(SinkConfig {
        width: u32::from(width),
        height: u32::from(height),
        fps: script.fps,
    })?;

    let frames = script.frame_count();
    let replayed = (|| -> OrreryResult<()> {
        for idx in 0..frames {
            let now = script.frame_time_ms(idx);
            while let Some(ev) = pending.next_if(|ev| ev.at_ms <= now) {
                if let Err(e) = apply_event(presentation, ev) {
                    tracing::warn!(at_ms = ev.at_ms, error = %e, "skipping script event");
                }
            }
            presentation.frame(now);
            let frame = presentation.render(backend)?;
            sink.push_frame(idx, &frame)?;
        }
        Ok(())
    })();
    if let Err(e) = replayed {
        if let Err(end_err) = sink.end() {
            tracing::warn!(error = %end_err, "failed to close sink after replay error");
        }
        return Err(e);
    }
    sink.end()?;

    tracing::debug!(frames, "script replayed");
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/script.rs"]
mod tests;
