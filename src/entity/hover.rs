use crate::foundation::math::ease_toward;

/// Radius that eases exponentially between a base and a hovered value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverRadius {
    /// Radius when not hovered.
    pub base: f64,
    /// Radius when hovered; also the hit radius.
    pub hover: f64,
    current: f64,
    target: f64,
    easing: f64,
    hovered: bool,
}

impl HoverRadius {
    /// Start at `base`, not hovered.
    pub fn new(base: f64, hover: f64, easing: f64) -> Self {
        Self {
            base,
            hover,
            current: base,
            target: base,
            easing,
            hovered: false,
        }
    }

    /// Toggle the hover target.
    pub fn set_hover(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.target = if hovered { self.hover } else { self.base };
    }

    /// One easing step.
    pub fn update(&mut self) {
        self.current = ease_toward(self.current, self.target, self.easing);
    }

    /// Radius to draw this tick.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Radius being eased toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Hover flag.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[cfg(test)]
#[path = "../../tests/unit/entity/hover.rs"]
mod tests;
