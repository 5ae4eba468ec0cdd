/// All messages that can flow through the overlay's single event queue.
///
/// Sources:
/// - Host input layer        → `Input`
/// - Scheduler               → `TimerFired`
/// - Recents helper client   → `RecentsReply`
/// - Host audio observer     → `ExternalVolume`
/// - Store watcher           → `AppearanceCommitted`
/// - Host lifecycle          → `Shutdown`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// One raw input event from the host, in arrival order.
    Input(InputEvent),
    /// A scheduled callback became due.
    TimerFired(TimerToken),
    /// The out-of-process recents helper answered a request.
    RecentsReply { ok: bool, reason: Option<String> },
    /// The host audio level changed outside the overlay (remote keys, other apps).
    ExternalVolume(i32),
    /// The settings collaborator committed new appearance values to the store.
    AppearanceCommitted,
    /// Host asked the overlay to stop.
    Shutdown,
}

/// Identity of one scheduled callback.  Tokens are never reused by a scheduler,
/// so a late firing of a cancelled timer can always be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// One typed input event.  Every host listener (touch, click, long-press,
/// seek, generic motion) is folded into this enum so that dispatch priority
/// lives in one handler chain instead of in listener registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Raw pointer stream on the strip, in screen coordinates.
    Pointer(PointerEvent),
    /// Mouse wheel.  Positive `steps` = scroll down.
    Scroll { steps: i32 },
    /// Remote-style click (or a tap the drag controller let through).
    Click(Button),
    LongPress(Button),
    /// Hover or focus entered the strip.
    HoverEnter,
    SeekStart(Slider),
    SeekChange {
        slider:    Slider,
        position:  i32,
        /// `false` when the host moved the slider itself (e.g. echoing a volume change).
        from_user: bool,
    },
    SeekStop(Slider),
}

impl InputEvent {
    /// Whether this event counts as user activity for the collapse timer.
    pub fn is_interaction(&self) -> bool {
        match self {
            InputEvent::Pointer(PointerEvent::Down { .. }) => true,
            InputEvent::Pointer(_) => false,
            InputEvent::Scroll { .. }
            | InputEvent::Click(_)
            | InputEvent::LongPress(_)
            | InputEvent::HoverEnter
            | InputEvent::SeekStart(_) => true,
            InputEvent::SeekChange { from_user, .. } => *from_user,
            InputEvent::SeekStop(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32 },
}

/// Buttons on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Home,
    Recents,
    Close,
    /// Explicit expand trigger (the resize handle).
    Expand,
    VolumeToggle,
    TransparencyToggle,
}

impl Button {
    pub fn name(self) -> &'static str {
        match self {
            Button::Home               => "home",
            Button::Recents            => "recents",
            Button::Close              => "close",
            Button::Expand             => "expand",
            Button::VolumeToggle       => "volume",
            Button::TransparencyToggle => "transparency",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "home"         => Some(Button::Home),
            "recents"      => Some(Button::Recents),
            "close"        => Some(Button::Close),
            "expand"       => Some(Button::Expand),
            "volume"       => Some(Button::VolumeToggle),
            "transparency" => Some(Button::TransparencyToggle),
            _ => None,
        }
    }
}

/// Secondary-panel sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Volume,
    Transparency,
}

impl Slider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "volume"       => Some(Slider::Volume),
            "transparency" => Some(Slider::Transparency),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_down_is_interaction_but_move_is_not() {
        assert!(InputEvent::Pointer(PointerEvent::Down { x: 0, y: 0 }).is_interaction());
        assert!(!InputEvent::Pointer(PointerEvent::Move { x: 5, y: 5 }).is_interaction());
        assert!(!InputEvent::Pointer(PointerEvent::Up { x: 5, y: 5 }).is_interaction());
    }

    #[test]
    fn host_echoed_seek_is_not_interaction() {
        let echoed = InputEvent::SeekChange { slider: Slider::Volume, position: 3, from_user: false };
        let user = InputEvent::SeekChange { slider: Slider::Volume, position: 3, from_user: true };
        assert!(!echoed.is_interaction());
        assert!(user.is_interaction());
    }

    #[test]
    fn button_names_round_trip() {
        for b in [
            Button::Home,
            Button::Recents,
            Button::Close,
            Button::Expand,
            Button::VolumeToggle,
            Button::TransparencyToggle,
        ] {
            assert_eq!(Button::from_name(b.name()), Some(b));
        }
        assert_eq!(Button::from_name("power"), None);
    }
}
