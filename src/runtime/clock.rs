// Evenly spaced timestamps may land a rounding error short of the interval.
const SLACK_MS: f64 = 1e-6;

/// Display-callback gate with a frame-rate cap.
///
/// Callbacks that arrive sooner than `interval_ms` after the last accepted one are skipped.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval_ms: f64,
    last_ms: Option<f64>,
    running: bool,
}

impl FrameClock {
    /// Stopped clock accepting at most one frame per `interval_ms`.
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ms: None,
            running: false,
        }
    }

    /// Start accepting callbacks.
    pub fn start(&mut self) {
        self.running = true;
        self.last_ms = None;
    }

    /// Whether callbacks are accepted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop accepting callbacks.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Restart at `now_ms`; the next frame is accepted one interval later.
    ///
    /// No-op while already running.
    pub fn resume(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_ms = Some(now_ms);
    }

    /// Decide whether the callback at `now_ms` runs a frame.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        if let Some(last) = self.last_ms
            && now_ms - last + SLACK_MS < self.interval_ms
        {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}

/// Leading-edge rate limiter.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    /// Let one event through per `interval_ms`.
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// `true` when the event at `now_ms` should be handled.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last <= self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Trailing-edge debounce: only the last value survives a quiet period.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    quiet_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debounce<T> {
    /// Deliver a value once `quiet_ms` pass without a newer one.
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    /// Record `value` at `now_ms`, replacing any pending one.
    pub fn push(&mut self, value: T, now_ms: f64) {
        self.pending = Some((value, now_ms));
    }

    /// Take the pending value if it has settled by `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        let settled = matches!(&self.pending, Some((_, at)) if now_ms - *at >= self.quiet_ms);
        if settled {
            self.pending.take().map(|(v, _)| v)
        } else {
            None
        }
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/clock.rs"]
mod tests;
