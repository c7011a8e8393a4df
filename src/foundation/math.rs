use crate::foundation::core::{Point, Vec2};

/// One step of exponential smoothing of `current` toward `target`.
pub fn ease_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Squared distance between two points.
pub fn dist_sq(a: Point, b: Point) -> f64 {
    (a - b).hypot2()
}

/// `true` when `p` lies strictly inside the circle of `radius` around `center`.
pub fn within_radius(p: Point, center: Point, radius: f64) -> bool {
    dist_sq(p, center) < radius * radius
}

/// Rotate `offset` by `angle` radians about the origin.
pub fn rotate_vec(offset: Vec2, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(offset.x * c - offset.y * s, offset.x * s + offset.y * c)
}

/// Map a screen point into the frame of a layer rotated by `rotation` about `center`.
///
/// Goes through polar form: the angle of the offset has the rotation subtracted and the
/// distance is kept.
pub fn unrotate_about(p: Point, center: Point, rotation: f64) -> Point {
    let d = p - center;
    let dist = d.hypot();
    let angle = d.y.atan2(d.x) - rotation;
    Point::new(angle.cos() * dist, angle.sin() * dist)
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
