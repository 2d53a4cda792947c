//! Tag color palette (16 colors)

use rand::Rng;

pub const TAG_COLOR_PALETTE: [&str; 16] = [
    "#e53935", // red
    "#d81b60", // pink
    "#8e24aa", // purple
    "#5e35b1", // deep purple
    "#3949ab", // indigo
    "#1e88e5", // blue
    "#039be5", // light blue
    "#00acc1", // cyan
    "#00897b", // teal
    "#43a047", // green
    "#7cb342", // light green
    "#c0ca33", // lime
    "#fdd835", // yellow
    "#ffb300", // amber
    "#fb8c00", // orange
    "#6d4c41", // brown
];

/// Pick a palette color uniformly at random
pub fn random_palette_color() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..TAG_COLOR_PALETTE.len());
    TAG_COLOR_PALETTE[idx]
}

/// Whether a color is one of the palette entries (case-insensitive)
pub fn is_palette_color(color: &str) -> bool {
    TAG_COLOR_PALETTE
        .iter()
        .any(|c| c.eq_ignore_ascii_case(color.trim()))
}
