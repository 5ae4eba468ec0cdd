use crate::colors::Rgb;

/// One entry of the colour picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub hex:  &'static str,
}

impl NamedColor {
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(self.hex).unwrap_or(Rgb::WHITE)
    }
}

/// Fixed choices offered by the settings picker, in display order.
pub const PALETTE: &[NamedColor] = &[
    NamedColor { name: "Red",    hex: "#F44336" },
    NamedColor { name: "Green",  hex: "#4CAF50" },
    NamedColor { name: "Blue",   hex: "#2196F3" },
    NamedColor { name: "Yellow", hex: "#FFEB3B" },
    NamedColor { name: "Black",  hex: "#000000" },
    NamedColor { name: "White",  hex: "#FFFFFF" },
    NamedColor { name: "Purple", hex: "#9C27B0" },
    NamedColor { name: "Orange", hex: "#FF9800" },
];

/// Case-insensitive palette lookup.
pub fn find(name: &str) -> Option<&'static NamedColor> {
    let name = name.trim();
    PALETTE.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn lookup(name: &str) -> Option<Rgb> {
    find(name).map(NamedColor::rgb)
}
