use crate::host::{Notifier, RecentsHelper, SystemHost};
use ribbon_core::HostError;
use tracing::{debug, info, warn};

/// Notice shown when neither the host nor the helper could open recents.
pub const RECENTS_FAILED: &str = "Failed to open Recents.";

/// Discrete shortcuts on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GoHome,
    ToggleRecents,
    Close,
}

/// What the controller must do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Done,
    /// Tear the overlay down and end the controller's lifecycle.
    Close,
}

/// Turns shortcut activations into outbound host requests.
#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher {
    /// Helper requests sent and not yet answered.
    awaiting_helper: usize,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(
        &mut self,
        action: Action,
        system: &mut dyn SystemHost,
        recents: &mut dyn RecentsHelper,
    ) -> Dispatched {
        match action {
            Action::GoHome => {
                // Fire-and-forget: the dispatcher has no failure path here.
                if let Err(e) = system.go_home() {
                    debug!("go-home request not honoured: {e}");
                }
                Dispatched::Done
            }
            Action::ToggleRecents => {
                match system.show_recents() {
                    Ok(()) => {}
                    Err(e) => {
                        if e != HostError::Unsupported {
                            warn!("host recents request failed: {e}; asking helper");
                        }
                        info!("Delegating recents to helper");
                        self.awaiting_helper += 1;
                        recents.request_open();
                    }
                }
                Dispatched::Done
            }
            Action::Close => Dispatched::Close,
        }
    }

    /// The helper answered one request.
    pub fn on_helper_reply(&mut self, ok: bool, reason: Option<&str>, notifier: &mut dyn Notifier) {
        if self.awaiting_helper == 0 {
            debug!("unsolicited recents reply (ok={ok})");
            return;
        }
        self.awaiting_helper -= 1;

        if !ok {
            warn!("Recents helper failed: {}", reason.unwrap_or("no reason given"));
            notifier.notice(RECENTS_FAILED);
        }
    }

    pub fn awaiting_helper(&self) -> usize {
        self.awaiting_helper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Shell {
        recents_supported: bool,
        home:              usize,
        recents:           usize,
    }

    impl SystemHost for Shell {
        fn go_home(&mut self) -> Result<(), HostError> {
            self.home += 1;
            Ok(())
        }
        fn show_recents(&mut self) -> Result<(), HostError> {
            if self.recents_supported {
                self.recents += 1;
                Ok(())
            } else {
                Err(HostError::Unsupported)
            }
        }
    }

    #[derive(Default)]
    struct Helper(usize);

    impl RecentsHelper for Helper {
        fn request_open(&mut self) {
            self.0 += 1;
        }
    }

    #[derive(Default)]
    struct Toasts(Vec<String>);

    impl Notifier for Toasts {
        fn notice(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    #[test]
    fn home_goes_straight_to_host() {
        let (mut d, mut shell, mut helper) = (ActionDispatcher::new(), Shell::default(), Helper::default());
        assert_eq!(d.dispatch(Action::GoHome, &mut shell, &mut helper), Dispatched::Done);
        assert_eq!((shell.home, helper.0), (1, 0));
    }

    #[test]
    fn recents_uses_host_when_supported() {
        let mut shell = Shell { recents_supported: true, ..Shell::default() };
        let mut helper = Helper::default();
        ActionDispatcher::new().dispatch(Action::ToggleRecents, &mut shell, &mut helper);
        assert_eq!((shell.recents, helper.0), (1, 0));
    }

    #[test]
    fn unsupported_recents_falls_back_and_reports_failure() {
        let (mut d, mut shell, mut helper) = (ActionDispatcher::new(), Shell::default(), Helper::default());
        let mut toasts = Toasts::default();

        d.dispatch(Action::ToggleRecents, &mut shell, &mut helper);
        assert_eq!(helper.0, 1);
        assert_eq!(d.awaiting_helper(), 1);

        d.on_helper_reply(false, Some("denied"), &mut toasts);
        assert_eq!(toasts.0, vec![RECENTS_FAILED.to_string()]);

        // A duplicate or late reply with nothing outstanding stays silent.
        d.on_helper_reply(false, None, &mut toasts);
        assert_eq!(toasts.0.len(), 1);
    }

    #[test]
    fn successful_helper_reply_is_silent() {
        let (mut d, mut shell, mut helper) = (ActionDispatcher::new(), Shell::default(), Helper::default());
        let mut toasts = Toasts::default();
        d.dispatch(Action::ToggleRecents, &mut shell, &mut helper);
        d.on_helper_reply(true, None, &mut toasts);
        assert!(toasts.0.is_empty());
    }

    #[test]
    fn close_is_handed_back() {
        let (mut d, mut shell, mut helper) = (ActionDispatcher::new(), Shell::default(), Helper::default());
        assert_eq!(d.dispatch(Action::Close, &mut shell, &mut helper), Dispatched::Close);
    }
}
