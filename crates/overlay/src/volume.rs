use crate::host::AudioHost;
use ribbon_core::VolumeSlider;
use tracing::debug;

/// Maps scroll steps and slider drags onto the host audio level.
///
/// The slider is a mirror: the host level is the source of truth and is read
/// fresh on every adjustment.
#[derive(Debug, Clone, Default)]
pub struct VolumeController {
    slider: VolumeSlider,
}

impl VolumeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slider(&self) -> VolumeSlider {
        self.slider
    }

    /// Pull the host level and maximum into the slider (panel just opened).
    pub fn sync(&mut self, audio: &dyn AudioHost) {
        self.slider.set_max(audio.max());
        self.slider.set_position(audio.level());
    }

    /// Step the host level by `direction` (`-1` or `+1`), clamped to `[0, max]`.
    ///
    /// The host is written only when the level actually changes.  The slider
    /// mirrors the result only while it is on screen.  Returns the new level.
    pub fn adjust(&mut self, audio: &mut dyn AudioHost, direction: i32, slider_visible: bool) -> i32 {
        let max = audio.max().max(0);
        let current = audio.level();
        let new = current.saturating_add(direction.signum()).clamp(0, max);

        if new != current {
            audio.set_level(new);
            debug!("volume {current} -> {new} (max {max})");
        }
        if slider_visible {
            self.slider.set_max(max);
            self.slider.set_position(new);
        }
        new
    }

    /// Wheel input.  Positive `steps` scroll down and lower the volume.
    /// Steps past the end of the range are dropped.
    pub fn scroll(&mut self, audio: &mut dyn AudioHost, steps: i32, slider_visible: bool) -> i32 {
        let direction = -steps.signum();
        let span = audio.max().max(0).unsigned_abs().saturating_add(1);
        let mut level = audio.level();
        for _ in 0..steps.unsigned_abs().min(span) {
            level = self.adjust(audio, direction, slider_visible);
        }
        level
    }

    /// Slider moved.  Only direct user manipulation reaches the host; a host
    /// echo of an external change is ignored here (see [`Self::on_external`]).
    pub fn set_absolute(&mut self, audio: &mut dyn AudioHost, position: i32, from_user: bool) -> Option<i32> {
        if !from_user {
            return None;
        }
        let level = self.slider.set_position(position);
        audio.set_level(level);
        Some(level)
    }

    /// The host level changed behind our back; mirror it.
    pub fn on_external(&mut self, level: i32) -> i32 {
        self.slider.set_position(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Audio {
        level:  i32,
        max:    i32,
        writes: usize,
    }

    impl AudioHost for Audio {
        fn level(&self) -> i32 {
            self.level
        }
        fn max(&self) -> i32 {
            self.max
        }
        fn set_level(&mut self, level: i32) {
            self.level = level;
            self.writes += 1;
        }
    }

    fn audio(level: i32, max: i32) -> Audio {
        Audio { level, max, writes: 0 }
    }

    #[test]
    fn adjust_stays_in_bounds_for_every_start() {
        for max in 0..=15 {
            for current in 0..=max {
                for direction in [-1, 1] {
                    let mut a = audio(current, max);
                    let new = VolumeController::new().adjust(&mut a, direction, false);
                    assert!((0..=max).contains(&new));
                    assert_eq!(new, (current + direction).clamp(0, max));
                }
            }
        }
    }

    #[test]
    fn boundaries_are_idempotent_and_skip_the_write() {
        let mut v = VolumeController::new();
        let mut a = audio(0, 15);
        assert_eq!(v.adjust(&mut a, -1, false), 0);
        let mut b = audio(15, 15);
        assert_eq!(v.adjust(&mut b, 1, false), 15);
        assert_eq!(a.writes + b.writes, 0);
    }

    #[test]
    fn slider_mirrors_only_when_visible() {
        let mut v = VolumeController::new();
        let mut a = audio(5, 15);
        v.adjust(&mut a, 1, false);
        assert_eq!(v.slider().position(), 0);
        v.adjust(&mut a, 1, true);
        assert_eq!((v.slider().position(), v.slider().max()), (7, 15));
    }

    #[test]
    fn scroll_down_lowers_scroll_up_raises() {
        let mut v = VolumeController::new();
        let mut a = audio(5, 15);
        assert_eq!(v.scroll(&mut a, 1, false), 4);
        assert_eq!(v.scroll(&mut a, -3, false), 7);
        assert_eq!(v.scroll(&mut a, 20, false), 0);
        assert_eq!(v.scroll(&mut a, 0, false), 0);
    }

    #[test]
    fn host_echo_is_not_written_back() {
        let mut v = VolumeController::new();
        let mut a = audio(5, 15);
        v.sync(&a);
        assert_eq!(v.set_absolute(&mut a, 9, false), None);
        assert_eq!(a.writes, 0);
        assert_eq!(v.set_absolute(&mut a, 9, true), Some(9));
        assert_eq!(a.level, 9);
    }

    #[test]
    fn slider_bound_applies_to_absolute_and_external() {
        let mut v = VolumeController::new();
        let mut a = audio(5, 15);
        v.sync(&a);
        assert_eq!(v.set_absolute(&mut a, 99, true), Some(15));
        assert_eq!(v.on_external(-2), 0);
        assert_eq!(v.on_external(40), 15);
    }

    #[test]
    fn extreme_scroll_clamps_in_one_pass() {
        let mut v = VolumeController::new();
        let mut a = audio(7, 15);
        assert_eq!(v.scroll(&mut a, i32::MIN, true), 15);
        assert_eq!(a.writes, 8);
        assert_eq!(v.scroll(&mut a, i32::MAX, true), 0);
        assert_eq!(a.writes, 8 + 15);
        assert_eq!(v.slider().position(), 0);
    }
}
