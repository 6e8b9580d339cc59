use crossterm::style::Color;

/// The 37-step ramp of the Doom PSX fire, black to white
pub const DOOM_PALETTE: [(u8, u8, u8); 37] = [
    (7, 7, 7),
    (31, 7, 7),
    (47, 15, 7),
    (71, 15, 7),
    (87, 23, 7),
    (103, 31, 7),
    (119, 31, 7),
    (143, 39, 7),
    (159, 47, 7),
    (175, 63, 7),
    (191, 71, 7),
    (199, 71, 7),
    (223, 79, 7),
    (223, 87, 7),
    (223, 87, 7),
    (215, 95, 7),
    (215, 95, 7),
    (215, 103, 15),
    (207, 111, 15),
    (207, 119, 15),
    (207, 127, 15),
    (207, 135, 23),
    (199, 135, 23),
    (199, 143, 23),
    (199, 151, 31),
    (191, 159, 31),
    (191, 159, 31),
    (191, 167, 39),
    (191, 167, 39),
    (191, 175, 47),
    (183, 175, 47),
    (183, 183, 47),
    (183, 183, 55),
    (207, 207, 111),
    (223, 223, 159),
    (239, 239, 199),
    (255, 255, 255),
];

/// ASCII ramp for plain output, coldest first
pub const PLAIN_RAMP: [char; 10] = [' ', '.', ':', ';', '*', 'o', 'O', '#', '@', '%'];

/// Position of `intensity` on a ramp of `steps` entries
fn ramp_index(intensity: u8, max_intensity: u8, steps: usize) -> usize {
    if max_intensity == 0 {
        return 0;
    }
    let intensity = intensity.min(max_intensity) as usize;
    intensity * (steps - 1) / max_intensity as usize
}

/// Palette entry for an intensity. Palettes other than 37 levels are
/// stretched onto the Doom ramp.
pub fn fire_rgb(intensity: u8, max_intensity: u8) -> (u8, u8, u8) {
    DOOM_PALETTE[ramp_index(intensity, max_intensity, DOOM_PALETTE.len())]
}

pub fn fire_color(intensity: u8, max_intensity: u8) -> Color {
    let (r, g, b) = fire_rgb(intensity, max_intensity);
    Color::Rgb { r, g, b }
}

pub fn plain_char(intensity: u8, max_intensity: u8) -> char {
    PLAIN_RAMP[ramp_index(intensity, max_intensity, PLAIN_RAMP.len())]
}
