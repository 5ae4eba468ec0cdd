//! Live preview used by the settings tool.
//!
//! Every edit re-renders immediately.  Malformed colour text never errors
//! while editing; it renders a solid red indicator instead and blocks saving.

use crate::colors::{clamp_alpha, compose, Argb, Rgb};
use crate::Appearance;
use ribbon_config::store::{
    AppearanceStore, DEFAULT_BUTTON_COLOR, DEFAULT_RIBBON_COLOR, DEFAULT_RIBBON_TRANSPARENCY,
    KEY_BUTTON_COLOR, KEY_RIBBON_COLOR, KEY_RIBBON_TRANSPARENCY,
};
use ribbon_core::{Result, RibbonError};

/// Solid red shown in place of the preview when a colour can't be parsed.
pub const ERROR_INDICATOR: Argb = Argb::opaque(Rgb::RED);

/// Which text field failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewField {
    RibbonColor,
    ButtonColor,
}

impl std::fmt::Display for PreviewField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewField::RibbonColor => f.write_str("ribbon colour"),
            PreviewField::ButtonColor => f.write_str("button colour"),
        }
    }
}

/// Result of one preview render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewFrame {
    Valid { background: Argb, foreground: Argb },
    Invalid { indicator: Argb, field: PreviewField },
}

/// Transient, editable copy of the appearance.  Never shared with the
/// running overlay except through [`PreviewSession::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSession {
    ribbon_text: String,
    button_text: String,
    alpha:       u8,
}

impl PreviewSession {
    /// Seed the editor with the store's committed text.
    pub fn from_store(store: &dyn AppearanceStore) -> Self {
        Self {
            ribbon_text: store.get_string(KEY_RIBBON_COLOR, DEFAULT_RIBBON_COLOR),
            button_text: store.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR),
            alpha:       clamp_alpha(store.get_int(KEY_RIBBON_TRANSPARENCY, DEFAULT_RIBBON_TRANSPARENCY)),
        }
    }

    pub fn set_ribbon_text(&mut self, text: impl Into<String>) -> PreviewFrame {
        self.ribbon_text = text.into();
        self.render()
    }

    pub fn set_button_text(&mut self, text: impl Into<String>) -> PreviewFrame {
        self.button_text = text.into();
        self.render()
    }

    pub fn set_alpha(&mut self, alpha: i64) -> PreviewFrame {
        self.alpha = clamp_alpha(alpha);
        self.render()
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn render(&self) -> PreviewFrame {
        match self.appearance() {
            Ok(a) => PreviewFrame::Valid {
                background: compose(a.base, a.alpha()),
                foreground: a.foreground(),
            },
            Err(field) => PreviewFrame::Invalid { indicator: ERROR_INDICATOR, field },
        }
    }

    fn appearance(&self) -> std::result::Result<Appearance, PreviewField> {
        let base = Rgb::parse(&self.ribbon_text).ok_or(PreviewField::RibbonColor)?;
        let button = Rgb::parse(&self.button_text).ok_or(PreviewField::ButtonColor)?;
        Ok(Appearance::new(base, button, self.alpha))
    }

    /// Write the edited values (normalised to `#RRGGBB`) and commit them.
    /// Nothing is written when any field is malformed.
    pub fn save(&self, store: &mut dyn AppearanceStore) -> Result<Appearance> {
        let appearance = self.appearance().map_err(|field| {
            let text = match field {
                PreviewField::RibbonColor => &self.ribbon_text,
                PreviewField::ButtonColor => &self.button_text,
            };
            RibbonError::Config(format!("invalid {field}: '{text}'"))
        })?;

        store.set_string(KEY_RIBBON_COLOR, &appearance.base.to_hex());
        store.set_string(KEY_BUTTON_COLOR, &appearance.button.to_hex());
        store.set_int(KEY_RIBBON_TRANSPARENCY, i64::from(appearance.alpha()));
        store.commit()?;
        Ok(appearance)
    }
}
