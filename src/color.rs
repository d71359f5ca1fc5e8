// Simple color struct, created from an unsigned 32 representing RRGGBBAA,
// plus the fixed palettes the page effects draw with

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// The two hues a field particle may take
pub const PARTICLE_GREEN: Color = Color::from_u32(0x39ff6aff);
pub const PARTICLE_GOLD: Color = Color::from_u32(0xf5c300ff);

// Connection lines always use the green hue
pub const LINK_GREEN: Color = PARTICLE_GREEN;

pub const CONFETTI_PALETTE: [Color; 6] = [
    Color::from_u32(0xf5c300ff),
    Color::from_u32(0x2db84aff),
    Color::from_u32(0x39ff6aff),
    Color::from_u32(0xffffffff),
    Color::from_u32(0xc0392bff),
    Color::from_u32(0x128c50ff),
];

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // CSS color string for canvas fill/stroke/shadow styles. Opacity is
    // handled through globalAlpha by the callers, so alpha is left out here.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}
