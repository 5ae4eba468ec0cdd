pub mod colors;
pub mod palette;
pub mod preview;

pub use colors::{clamp_alpha, compose, Argb, Rgb};
pub use palette::{NamedColor, PALETTE};
pub use preview::{PreviewField, PreviewFrame, PreviewSession};

use ribbon_config::store::{
    AppearanceStore, DEFAULT_BUTTON_COLOR, DEFAULT_RIBBON_COLOR, DEFAULT_RIBBON_TRANSPARENCY,
    KEY_BUTTON_COLOR, KEY_RIBBON_COLOR, KEY_RIBBON_TRANSPARENCY,
};
use tracing::warn;

/// Committed appearance of the running overlay.
///
/// Built once from the appearance store.  Calling [`Appearance::load`] is
/// infallible: unparseable colours fall back to black (strip) and white
/// (buttons).  Only the alpha can change afterwards, through the in-overlay
/// transparency slider; hue is edited from the settings tool alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub base:   Rgb,
    pub button: Rgb,
    alpha:      u8,
}

impl Appearance {
    pub fn new(base: Rgb, button: Rgb, alpha: u8) -> Self {
        Self { base, button, alpha }
    }

    pub fn load(store: &dyn AppearanceStore) -> Self {
        let base = parse_or(
            store.get_string(KEY_RIBBON_COLOR, DEFAULT_RIBBON_COLOR),
            KEY_RIBBON_COLOR,
            Rgb::BLACK,
        );
        let button = parse_or(
            store.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR),
            KEY_BUTTON_COLOR,
            Rgb::WHITE,
        );
        let alpha = clamp_alpha(store.get_int(KEY_RIBBON_TRANSPARENCY, DEFAULT_RIBBON_TRANSPARENCY));

        Self { base, button, alpha }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Apply a transparency slider position.  Returns the new background.
    pub fn set_alpha(&mut self, alpha: i64) -> Argb {
        self.alpha = clamp_alpha(alpha);
        self.background()
    }

    /// Strip background: base colour composed with the current alpha.
    pub fn background(&self) -> Argb {
        compose(self.base, self.alpha)
    }

    /// Text colour for the clock and every button.
    pub fn foreground(&self) -> Argb {
        Argb::opaque(self.button)
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::new(Rgb::BLACK, Rgb::WHITE, DEFAULT_RIBBON_TRANSPARENCY as u8)
    }
}

fn parse_or(raw: String, key: &str, fallback: Rgb) -> Rgb {
    Rgb::parse(&raw).unwrap_or_else(|| {
        warn!("Stored {key} '{raw}' is not a colour; using {}", fallback.to_hex());
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_config::MemoryStore;
    use toml::Value;

    #[test]
    fn empty_store_gives_documented_defaults() {
        let a = Appearance::load(&MemoryStore::new());
        assert_eq!(a, Appearance::default());
        assert_eq!(a.background(), Argb(0xCC00_0000));
        assert_eq!(a.foreground(), Argb(0xFFFF_FFFF));
    }

    #[test]
    fn stored_values_compose_into_background() {
        let store = MemoryStore::with_values([
            (KEY_RIBBON_TRANSPARENCY, Value::Integer(200)),
            (KEY_RIBBON_COLOR, Value::String("#224466".into())),
        ]);
        let a = Appearance::load(&store);
        let bg = a.background();
        assert_eq!((bg.alpha(), bg.rgb()), (200, Rgb::from_u32(0x224466)));
    }

    #[test]
    fn malformed_button_colour_falls_back_to_white() {
        let store = MemoryStore::with_values([(KEY_BUTTON_COLOR, Value::String("notacolor".into()))]);
        let a = Appearance::load(&store);
        assert_eq!(a.button, Rgb::WHITE);
        assert_eq!(a.button.to_u32(), 0xFFFFFF);
    }

    #[test]
    fn out_of_range_alpha_is_clamped() {
        let store = MemoryStore::with_values([(KEY_RIBBON_TRANSPARENCY, Value::Integer(999))]);
        assert_eq!(Appearance::load(&store).alpha(), 255);

        let mut a = Appearance::default();
        assert_eq!(a.set_alpha(-10).alpha(), 0);
        assert_eq!(a.base, Rgb::BLACK);
    }
}
