/// First `min(len, floor(elapsed_ms / ms_per_char))` characters of `text`.
pub fn typed_prefix(text: &str, elapsed_ms: f64, ms_per_char: f64) -> &str {
    let total = text.chars().count();
    let shown = if ms_per_char > 0.0 {
        ((elapsed_ms.max(0.0) / ms_per_char).floor() as usize).min(total)
    } else {
        total
    };
    match text.char_indices().nth(shown) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// Two-line header revealed one character at a time; the subtitle starts after the title
/// completes.
#[derive(Clone, Debug)]
pub struct TypingHeader {
    title: String,
    subtitle: String,
    title_ms_per_char: f64,
    subtitle_ms_per_char: f64,
    title_elapsed: f64,
    subtitle_elapsed: f64,
    title_done: bool,
}

impl TypingHeader {
    /// Header with nothing revealed yet.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        title_ms_per_char: f64,
        subtitle_ms_per_char: f64,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            title_ms_per_char,
            subtitle_ms_per_char,
            title_elapsed: 0.0,
            subtitle_elapsed: 0.0,
            title_done: false,
        }
    }

    /// Advance the reveal by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        let dt = dt_ms.max(0.0);
        if !self.title_done {
            self.title_elapsed += dt;
            if self.visible_title().len() == self.title.len() {
                self.title_done = true;
            }
        } else if !self.is_done() {
            self.subtitle_elapsed += dt;
        }
    }

    /// Revealed part of the title.
    pub fn visible_title(&self) -> &str {
        typed_prefix(&self.title, self.title_elapsed, self.title_ms_per_char)
    }

    /// Revealed part of the subtitle; empty until the title is complete.
    pub fn visible_subtitle(&self) -> &str {
        if !self.title_done {
            return "";
        }
        typed_prefix(
            &self.subtitle,
            self.subtitle_elapsed,
            self.subtitle_ms_per_char,
        )
    }

    /// `true` once both lines are fully shown.
    pub fn is_done(&self) -> bool {
        self.title_done && self.visible_subtitle().len() == self.subtitle.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/typing.rs"]
mod tests;
