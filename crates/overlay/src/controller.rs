//! The overlay controller: one process-scoped object that owns the window,
//! arbitrates input and drives the visibility state machine.
//!
//! Every input event, timer firing and collaborator reply arrives as a
//! [`Message`] and is handled to completion before the next one, in arrival
//! order.  Input runs through a fixed chain:
//!
//! 1. interaction bookkeeping (expand + reschedule collapse)
//! 2. drag (pointer events)
//! 3. scroll → volume
//! 4. click / long-press → actions and panel toggles
//! 5. sliders

use crate::clock::ClockLabel;
use crate::dispatch::{Action, ActionDispatcher, Dispatched};
use crate::drag::DragController;
use crate::host::{AudioHost, Notifier, RecentsHelper, StripView, SystemHost, WindowHost};
use crate::scheduler::Scheduler;
use crate::visibility::{Transition, VisibilityMachine};
use crate::volume::VolumeController;
use crate::window::OverlayWindow;
use chrono::Local;
use ribbon_config::{AppearanceStore, ClockConfig, CollapseMode, OverlayConfig, RibbonConfig};
use ribbon_core::{
    event::TimerToken, Button, InputEvent, Message, OverlayWindowState, PanelState, Result,
    RibbonError, Slider, Visibility, VolumeSlider,
};
use ribbon_theme::Appearance;
use tracing::{debug, error, info, warn};

/// Everything the controller talks to, handed over at construction.
pub struct Collaborators {
    pub window:    Box<dyn WindowHost>,
    pub audio:     Box<dyn AudioHost>,
    pub system:    Box<dyn SystemHost>,
    pub recents:   Box<dyn RecentsHelper>,
    pub notifier:  Box<dyn Notifier>,
    pub scheduler: Box<dyn Scheduler>,
    pub store:     Box<dyn AppearanceStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, never started.
    Idle,
    Running,
    /// Stopped by `Close`, `Shutdown` or a failed start.  `start()` may run again.
    Stopped,
}

pub struct OverlayController {
    overlay:    OverlayConfig,
    clock_cfg:  ClockConfig,
    lifecycle:  Lifecycle,

    window:     OverlayWindow,
    drag:       DragController,
    visibility: VisibilityMachine,
    volume:     VolumeController,
    panels:     PanelState,
    appearance: Appearance,
    dispatcher: ActionDispatcher,
    clock:      ClockLabel,
    clock_tick: Option<TimerToken>,

    audio:      Box<dyn AudioHost>,
    system:     Box<dyn SystemHost>,
    recents:    Box<dyn RecentsHelper>,
    notifier:   Box<dyn Notifier>,
    scheduler:  Box<dyn Scheduler>,
    store:      Box<dyn AppearanceStore>,
}

impl OverlayController {
    pub fn new(config: &RibbonConfig, parts: Collaborators) -> Self {
        let overlay = config.overlay.clone();
        Self {
            window:     OverlayWindow::new(parts.window, overlay.initial_x, overlay.initial_y),
            drag:       DragController::new(overlay.drag_threshold),
            visibility: VisibilityMachine::new(overlay.collapse_delay()),
            volume:     VolumeController::new(),
            panels:     PanelState::default(),
            appearance: Appearance::default(),
            dispatcher: ActionDispatcher::new(),
            clock:      ClockLabel::new(config.clock.format.clone()),
            clock_tick: None,
            clock_cfg:  config.clock.clone(),
            lifecycle:  Lifecycle::Idle,
            overlay,

            audio:      parts.audio,
            system:     parts.system,
            recents:    parts.recents,
            notifier:   parts.notifier,
            scheduler:  parts.scheduler,
            store:      parts.store,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Load appearance, create the window and arm timers.  Idempotent while
    /// running.  Window creation failure stops the controller and is the only
    /// error this type ever returns.
    pub fn start(&mut self) -> Result<()> {
        if self.lifecycle == Lifecycle::Running {
            debug!("start ignored: already running");
            return Ok(());
        }

        if let Err(e) = self.store.reload() {
            warn!("Appearance store reload failed: {e}; using cached values");
        }
        self.appearance = Appearance::load(self.store.as_ref());
        info!(
            "Appearance: background {} foreground {}",
            self.appearance.background(),
            self.appearance.foreground()
        );

        if let Err(e) = self.window.open(Visibility::Expanded.width()) {
            error!("Cannot create overlay window: {e}");
            self.notifier.notice("Unable to show the ribbon overlay.");
            self.lifecycle = Lifecycle::Stopped;
            return Err(RibbonError::Window(e.to_string()));
        }

        self.lifecycle = Lifecycle::Running;
        self.visibility.start(self.scheduler.as_mut());
        self.clock.refresh(&Local::now());
        self.clock_tick = Some(self.scheduler.schedule_repeating(self.clock_cfg.refresh()));
        self.volume.sync(self.audio.as_ref());
        self.present();

        info!(
            "Overlay running (collapse after {:?}, mode {:?})",
            self.overlay.collapse_delay(),
            self.overlay.collapse_mode
        );
        Ok(())
    }

    /// Cancel timers and destroy the window.  Idempotent.
    pub fn stop(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.visibility.stop(self.scheduler.as_mut());
        if let Some(tick) = self.clock_tick.take() {
            self.scheduler.cancel(tick);
        }
        self.window.close();
        self.drag = DragController::new(self.overlay.drag_threshold);
        self.lifecycle = Lifecycle::Stopped;
        info!("Overlay stopped");
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn window_state(&self) -> OverlayWindowState {
        self.window.state()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.state()
    }

    /// Panel toggles as the user left them.
    pub fn panel_toggles(&self) -> PanelState {
        self.panels
    }

    /// Panels actually on screen: collapse hides both regardless of toggles.
    pub fn panels_shown(&self) -> PanelState {
        match self.visibility.state() {
            Visibility::Expanded => self.panels,
            Visibility::Collapsed => PanelState::default(),
        }
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn volume_slider(&self) -> VolumeSlider {
        self.volume.slider()
    }

    pub fn clock_text(&self) -> &str {
        self.clock.text()
    }

    /// Collapse timer currently armed, if any.
    pub fn pending_collapse(&self) -> Option<TimerToken> {
        self.visibility.pending()
    }

    // ── Event entry point ─────────────────────────────────────────────────────

    /// Handle one queued message.  For input, returns whether the event was
    /// consumed (so the host must not synthesize a click from it).
    pub fn handle(&mut self, message: Message) -> bool {
        if !self.is_running() {
            debug!("dropping {message:?}: controller not running");
            return false;
        }

        let consumed = match message {
            Message::Input(event) => self.handle_input(event),
            Message::TimerFired(token) => {
                self.on_timer(token);
                true
            }
            Message::RecentsReply { ok, reason } => {
                self.dispatcher
                    .on_helper_reply(ok, reason.as_deref(), self.notifier.as_mut());
                true
            }
            Message::ExternalVolume(level) => {
                self.volume.on_external(level);
                true
            }
            Message::AppearanceCommitted => {
                self.reload_appearance();
                true
            }
            Message::Shutdown => {
                self.stop();
                return true;
            }
        };

        if self.is_running() {
            self.present();
        }
        consumed
    }

    fn handle_input(&mut self, event: InputEvent) -> bool {
        if event.is_interaction() {
            self.interact();
        }

        let step = self.drag.handle(&event, self.window.position());
        if !step.passed {
            if let Some((x, y)) = step.move_to {
                self.window.move_to(x, y);
            }
            return step.consumed;
        }

        match event {
            InputEvent::Pointer(_) => false,
            InputEvent::Scroll { steps } => {
                let visible = self.panels_shown().volume;
                self.volume.scroll(self.audio.as_mut(), steps, visible);
                true
            }
            InputEvent::Click(button) => {
                self.on_click(button);
                true
            }
            InputEvent::LongPress(button) => {
                debug!("long-press on {} counts as activity only", button.name());
                true
            }
            InputEvent::HoverEnter | InputEvent::SeekStart(_) | InputEvent::SeekStop(_) => true,
            InputEvent::SeekChange { slider, position, from_user } => {
                self.on_seek(slider, position, from_user);
                true
            }
        }
    }

    // ── Handlers ──────────────────────────────────────────────────────────────

    fn interact(&mut self) {
        match self.visibility.interact(self.scheduler.as_mut()) {
            Transition::Expanded => self.enter_expanded(),
            Transition::Rescheduled | Transition::Collapsed | Transition::None => {}
        }
    }

    fn on_timer(&mut self, token: TimerToken) {
        if self.clock_tick == Some(token) {
            self.clock.refresh(&Local::now());
            return;
        }
        match self.visibility.on_timer(token) {
            Transition::Collapsed => self.enter_collapsed(),
            Transition::Expanded | Transition::Rescheduled | Transition::None => {}
        }
    }

    fn enter_expanded(&mut self) {
        debug!("expanding");
        if !self.window.is_open() {
            if let Err(e) = self.window.open(Visibility::Expanded.width()) {
                warn!("Cannot recreate overlay window: {e}");
                self.notifier.notice("Unable to show the ribbon overlay.");
                return;
            }
        }
        self.window.resize(Visibility::Expanded.width());
    }

    fn enter_collapsed(&mut self) {
        debug!("collapsing ({:?})", self.overlay.collapse_mode);
        // Panels disappear through `panels_shown`; toggles are kept.
        match self.overlay.collapse_mode {
            CollapseMode::HidePanels => self.window.resize(Visibility::Collapsed.width()),
            CollapseMode::Teardown => {
                self.window.close();
            }
        }
    }

    fn on_click(&mut self, button: Button) {
        let action = match button {
            Button::Home => Action::GoHome,
            Button::Recents => Action::ToggleRecents,
            Button::Close => Action::Close,
            Button::Expand => return,
            Button::VolumeToggle => {
                if self.panels.toggle_volume() {
                    self.volume.sync(self.audio.as_ref());
                }
                return;
            }
            Button::TransparencyToggle => {
                self.panels.toggle_transparency();
                return;
            }
        };

        let outcome = self
            .dispatcher
            .dispatch(action, self.system.as_mut(), self.recents.as_mut());
        if outcome == Dispatched::Close {
            info!("Close requested");
            self.stop();
        }
    }

    fn on_seek(&mut self, slider: Slider, position: i32, from_user: bool) {
        match slider {
            Slider::Volume => {
                self.volume.set_absolute(self.audio.as_mut(), position, from_user);
            }
            Slider::Transparency if from_user => {
                let bg = self.appearance.set_alpha(i64::from(position));
                debug!("alpha {} -> background {bg}", self.appearance.alpha());
            }
            Slider::Transparency => {}
        }
    }

    fn reload_appearance(&mut self) {
        if let Err(e) = self.store.reload() {
            warn!("Appearance store reload failed: {e}");
            return;
        }
        self.appearance = Appearance::load(self.store.as_ref());
        info!("Appearance reloaded: background {}", self.appearance.background());
    }

    fn present(&mut self) {
        let shown = self.panels_shown();
        let view = StripView {
            background:         self.appearance.background(),
            foreground:         self.appearance.foreground(),
            clock:              self.clock.text().to_string(),
            volume_panel:       shown.volume,
            transparency_panel: shown.transparency,
            volume:             self.volume.slider(),
            alpha:              self.appearance.alpha(),
        };
        self.window.present(&view);
    }
}

impl std::fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("lifecycle", &self.lifecycle)
            .field("window", &self.window)
            .field("visibility", &self.visibility.state())
            .field("panels", &self.panels)
            .finish_non_exhaustive()
    }
}
