//! Small scalar helpers shared by the vector/matrix/quaternion kernel.

use crate::error::MathError;

/// Default epsilon for all similarity comparisons in the crate.
pub const DEFAULT_EPSILON: f64 = 0.00001;

/// Compares two values with a given tolerance.
#[inline]
pub fn similar(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Clamps `v` to `[min, max]`. The min bound wins when `min > max`.
#[inline]
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    f64::max(f64::min(v, max), min)
}

/// Linear interpolation between `a` and `b`. `t` is unrestricted; values
/// outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let it = 1.0 - t;
    a * it + b * t
}

/// Like `sin(counter)`, but oscillating over `[a, b]` instead of `[-1, 1]`.
/// With `speed = 1` the result is exactly `a` for even integer counters and
/// `b` for odd ones.
pub fn oscillate(a: f64, b: f64, counter: f64, speed: f64) -> f64 {
    ((counter * speed * std::f64::consts::PI - std::f64::consts::FRAC_PI_2).sin() * 0.5 + 0.5)
        * (b - a)
        + a
}

/// True mathematical modulo. Unlike `%`, the result is non-negative for
/// negative numerators (given a positive denominator).
pub fn modulo(numerator: i32, denominator: i32) -> Result<i32, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }

    if numerator == 0 {
        return Ok(0);
    }

    if denominator > 0 && numerator > 0 {
        return Ok(numerator % denominator);
    }

    Ok((denominator + (numerator % denominator)) % denominator)
}
