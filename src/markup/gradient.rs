//! Linear RGB gradient interpolation

use super::style::Rgb;

/// Blend two colors channel by channel; `factor` 0.0 is `from`, 1.0 is `to`
pub fn interpolate(from: Rgb, to: Rgb, factor: f64) -> Rgb {
    let channel = |a: u8, b: u8| {
        let value = f64::from(a) + (f64::from(b) - f64::from(a)) * factor;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

/// Color of the character at `position` out of `total` visible characters
///
/// The stops are spread evenly over `[0, total - 1]`. A single stop or
/// `total <= 1` gives a flat fill. Returns `None` only when `colors` is
/// empty.
pub fn color_at(colors: &[Rgb], position: usize, total: usize) -> Option<Rgb> {
    let first = *colors.first()?;
    if colors.len() == 1 || total <= 1 {
        return Some(first);
    }

    let last_segment = colors.len() - 1;
    let segment = last_segment as f64 * (position as f64 / (total - 1) as f64);
    let index = segment.floor() as usize;
    let factor = segment - index as f64;

    if index >= last_segment {
        return colors.last().copied();
    }
    Some(interpolate(colors[index], colors[index + 1], factor))
}
