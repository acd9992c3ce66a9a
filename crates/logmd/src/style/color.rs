//! Color identifier parsing.
//!
//! Identifiers are terminal palette indices written as decimal strings
//! (`"45"`, `"231"`). Hex identifiers (`"#ff79c6"`, `"#fff"`) are accepted too
//! and mapped onto the nearest entry of the 256-color palette.

/// Channel levels of the 6x6x6 color cube (palette entries 16..=231).
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Resolve a color identifier to a 256-color palette index.
///
/// Returns `None` for identifiers that are neither a palette index nor a hex
/// triplet.
#[must_use]
pub fn parse_color(id: &str) -> Option<u8> {
    let id = id.trim();
    if let Some(hex) = id.strip_prefix('#') {
        return parse_hex(hex).map(|(r, g, b)| rgb_to_ansi256(r, g, b));
    }
    id.parse::<u8>().ok()
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some((nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

/// Nearest 256-color palette index for an RGB triplet.
///
/// Considers the color cube and the grayscale ramp; ties go to the cube.
#[must_use]
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let nearest_level = |v: u8| -> usize {
        CUBE_LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| (i32::from(**level) - i32::from(v)).abs())
            .map_or(0, |(i, _)| i)
    };

    let (ri, gi, bi) = (nearest_level(r), nearest_level(g), nearest_level(b));
    let cube_index = 16 + 36 * ri + 6 * gi + bi;
    let cube_distance = distance(
        (r, g, b),
        (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]),
    );

    // Grayscale ramp: palette 232..=255 holds 8, 18, ..., 238.
    let average = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    let gray_step = if average < 8 {
        0
    } else {
        ((average - 8 + 5) / 10).min(23)
    };
    let gray_value = (8 + 10 * gray_step) as u8;
    let gray_distance = distance((r, g, b), (gray_value, gray_value, gray_value));

    if gray_distance < cube_distance {
        232 + gray_step as u8
    } else {
        cube_index as u8
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let diff = i32::from(x) - i32::from(y);
        (diff * diff) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
