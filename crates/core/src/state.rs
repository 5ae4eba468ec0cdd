/// Position and presentation of the single overlay window.
///
/// Owned exclusively by the overlay controller; mutated only by the drag
/// controller (position) and the visibility state machine (width, visible).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayWindowState {
    pub x:       i32,
    pub y:       i32,
    pub width:   WidthMode,
    pub visible: bool,
}

impl OverlayWindowState {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width:   WidthMode::Expanded,
            visible: false,
        }
    }
}

/// Horizontal extent of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthMode {
    /// Full strip: clock, shortcuts and panel toggles.
    #[default]
    Expanded,
    /// Minimal handle only.
    Collapsed,
}

/// Expanded / collapsed presentation of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Expanded,
    Collapsed,
}

impl Visibility {
    pub fn width(self) -> WidthMode {
        match self {
            Visibility::Expanded  => WidthMode::Expanded,
            Visibility::Collapsed => WidthMode::Collapsed,
        }
    }
}

/// Toggle state of the two secondary panels.
///
/// A panel is *shown* only while the strip is expanded and its toggle is on;
/// collapsing hides both without touching the toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    pub volume:       bool,
    pub transparency: bool,
}

impl PanelState {
    /// Flip the volume panel.  Opening it closes the transparency panel.
    pub fn toggle_volume(&mut self) -> bool {
        self.volume = !self.volume;
        if self.volume {
            self.transparency = false;
        }
        self.volume
    }

    /// Flip the transparency panel.  Opening it closes the volume panel.
    pub fn toggle_transparency(&mut self) -> bool {
        self.transparency = !self.transparency;
        if self.transparency {
            self.volume = false;
        }
        self.transparency
    }
}

/// Displayed volume slider, mirroring the host audio level.
///
/// Invariant: `0 <= position <= max` after every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeSlider {
    position: i32,
    max:      i32,
}

impl VolumeSlider {
    pub fn new(position: i32, max: i32) -> Self {
        let mut slider = Self { position: 0, max: max.max(0) };
        slider.set_position(position);
        slider
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Write a position, clamped to `[0, max]`.  Returns the stored value.
    pub fn set_position(&mut self, position: i32) -> i32 {
        self.position = position.clamp(0, self.max);
        self.position
    }

    /// Change the upper bound, re-clamping the current position.
    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(0);
        self.position = self.position.clamp(0, self.max);
    }
}
