use crate::palette;

/// 24-bit colour without transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0x00, g: 0x00, b: 0x00 };
    pub const WHITE: Self = Self { r: 0xFF, g: 0xFF, b: 0xFF };
    pub const RED:   Self = Self { r: 0xFF, g: 0x00, b: 0x00 };

    /// Take the low 24 bits of `value` as `0xRRGGBB`.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (leading `#` optional).  The alpha byte
    /// of the 8-digit form is discarded.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        let rgb = match hex.len() {
            6 => &hex[0..6],
            8 => {
                byte(&hex[0..2])?;
                &hex[2..8]
            }
            _ => return None,
        };

        Some(Self {
            r: byte(&rgb[0..2])?,
            g: byte(&rgb[2..4])?,
            b: byte(&rgb[4..6])?,
        })
    }

    /// Parse a hex colour or a palette name (`"orange"`, `"Blue"`).
    pub fn parse(text: &str) -> Option<Self> {
        Self::from_hex(text).or_else(|| palette::lookup(text))
    }

    /// `#RRGGBB`, upper-case.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Packed `0xAARRGGBB` colour, the form the host window paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    pub const fn new(alpha: u8, rgb: Rgb) -> Self {
        Self((alpha as u32) << 24 | rgb.to_u32())
    }

    pub const fn opaque(rgb: Rgb) -> Self {
        Self::new(0xFF, rgb)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn rgb(self) -> Rgb {
        Rgb::from_u32(self.0 & 0x00FF_FFFF)
    }
}

impl std::fmt::Display for Argb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Combine a base colour with an alpha channel.
#[inline]
pub const fn compose(base: Rgb, alpha: u8) -> Argb {
    Argb::new(alpha, base)
}

/// Clamp an arbitrary integer (slider position, stored value) to an alpha byte.
#[inline]
pub fn clamp_alpha(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
