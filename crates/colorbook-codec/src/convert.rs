//! Component conversion between on-disk bytes and normalized values.
//!
//! | Space | Byte → value | Value range |
//! |-------|--------------|-------------|
//! | RGB   | identity | 0..=255 |
//! | CMYK  | `round((255 - b) / 2.55)` (ink coverage is stored inverted) | 0..=100 |
//! | Lab   | `[round(l / 2.55), a - 128, b - 128]` | L 0..=100, a/b -128..=127 |
//!
//! Scaling by 2.55 is evaluated as an exact ratio (`* 100 / 255`) and
//! rounded half away from zero, so `to_components(from_components(v)) == v`
//! for every value in range. The byte direction is lossy.

use std::ops::RangeInclusive;

use crate::types::ColorSpace;

/// Convert on-disk component bytes to normalized values.
pub fn to_components(space: ColorSpace, bytes: &[u8]) -> Vec<i16> {
    match space {
        ColorSpace::Rgb => bytes.iter().map(|&b| i16::from(b)).collect(),
        ColorSpace::Cmyk => bytes
            .iter()
            .map(|&b| byte_to_percent(255 - i32::from(b)))
            .collect(),
        ColorSpace::Lab => bytes
            .iter()
            .enumerate()
            .map(|(index, &b)| match index {
                0 => byte_to_percent(i32::from(b)),
                _ => i16::from(b) - 128,
            })
            .collect(),
    }
}

/// Convert normalized values to on-disk component bytes, clamped to `0..=255`.
pub fn from_components(space: ColorSpace, components: &[i16]) -> Vec<u8> {
    match space {
        ColorSpace::Rgb => components
            .iter()
            .map(|&c| clamp_byte(i32::from(c)))
            .collect(),
        ColorSpace::Cmyk => components
            .iter()
            .map(|&c| clamp_byte(255 - percent_to_byte(i32::from(c))))
            .collect(),
        ColorSpace::Lab => components
            .iter()
            .enumerate()
            .map(|(index, &c)| match index {
                0 => clamp_byte(percent_to_byte(i32::from(c))),
                _ => clamp_byte(i32::from(c) + 128),
            })
            .collect(),
    }
}

/// Valid normalized range for a component of `space`.
pub fn component_range(space: ColorSpace, index: usize) -> RangeInclusive<i16> {
    match (space, index) {
        (ColorSpace::Rgb, _) => 0..=255,
        (ColorSpace::Cmyk, _) | (ColorSpace::Lab, 0) => 0..=100,
        (ColorSpace::Lab, _) => -128..=127,
    }
}

fn byte_to_percent(value: i32) -> i16 {
    // |value| <= 255, so the result fits comfortably.
    div_round(value * 100, 255) as i16
}

fn percent_to_byte(value: i32) -> i32 {
    div_round(value * 255, 100)
}

/// `numerator / denominator` rounded half away from zero. `denominator > 0`.
fn div_round(numerator: i32, denominator: i32) -> i32 {
    let magnitude = (2 * numerator.abs() + denominator) / (2 * denominator);
    if numerator < 0 {
        -magnitude
    } else {
        magnitude
    }
}

fn clamp_byte(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
