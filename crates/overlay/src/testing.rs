//! Recording fakes for every host capability.  Each fake is a cheap clone
//! around shared state so a test keeps one handle while the controller owns
//! the other.

use crate::controller::{Collaborators, OverlayController};
use crate::host::{
    AudioHost, Notifier, RecentsHelper, StripView, SystemHost, WindowHandle, WindowHost, WindowSpec,
};
use crate::scheduler::ManualScheduler;
use ribbon_config::{AppearanceStore, MemoryStore, RibbonConfig};
use ribbon_core::{HostError, InputEvent, Message, WidthMode};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ── Window ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct WindowLog {
    pub fail_create: bool,
    pub next_id:     u64,
    pub live:        Option<WindowHandle>,
    pub created:     Vec<WindowSpec>,
    pub repositions: Vec<(i32, i32)>,
    pub resizes:     Vec<WidthMode>,
    pub destroyed:   Vec<WindowHandle>,
    pub views:       Vec<StripView>,
}

impl WindowLog {
    pub fn last_view(&self) -> &StripView {
        self.views.last().expect("nothing presented yet")
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeWindowHost(pub Rc<RefCell<WindowLog>>);

impl FakeWindowHost {
    fn check(&self, handle: WindowHandle) -> Result<(), HostError> {
        if self.0.borrow().live == Some(handle) {
            Ok(())
        } else {
            Err(HostError::Gone)
        }
    }
}

impl WindowHost for FakeWindowHost {
    fn create(&mut self, spec: &WindowSpec) -> Result<WindowHandle, HostError> {
        let mut log = self.0.borrow_mut();
        if log.fail_create {
            return Err(HostError::Rejected("overlay permission missing".into()));
        }
        log.next_id += 1;
        let handle = WindowHandle(log.next_id);
        log.live = Some(handle);
        log.created.push(*spec);
        Ok(handle)
    }

    fn reposition(&mut self, handle: WindowHandle, x: i32, y: i32) -> Result<(), HostError> {
        self.check(handle)?;
        self.0.borrow_mut().repositions.push((x, y));
        Ok(())
    }

    fn resize(&mut self, handle: WindowHandle, width: WidthMode) -> Result<(), HostError> {
        self.check(handle)?;
        self.0.borrow_mut().resizes.push(width);
        Ok(())
    }

    fn destroy(&mut self, handle: WindowHandle) -> Result<(), HostError> {
        self.check(handle)?;
        let mut log = self.0.borrow_mut();
        log.live = None;
        log.destroyed.push(handle);
        Ok(())
    }

    fn present(&mut self, handle: WindowHandle, view: &StripView) -> Result<(), HostError> {
        self.check(handle)?;
        self.0.borrow_mut().views.push(view.clone());
        Ok(())
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct AudioState {
    pub level:  i32,
    pub max:    i32,
    pub writes: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct FakeAudio(pub Rc<RefCell<AudioState>>);

impl FakeAudio {
    pub fn new(level: i32, max: i32) -> Self {
        Self(Rc::new(RefCell::new(AudioState { level, max, writes: Vec::new() })))
    }
}

impl AudioHost for FakeAudio {
    fn level(&self) -> i32 {
        self.0.borrow().level
    }

    fn max(&self) -> i32 {
        self.0.borrow().max
    }

    fn set_level(&mut self, level: i32) {
        let mut s = self.0.borrow_mut();
        s.level = level;
        s.writes.push(level);
    }
}

// ── Shell, helper, toasts ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ShellLog {
    pub recents_supported: bool,
    pub home:              usize,
    pub recents:           usize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeSystem(pub Rc<RefCell<ShellLog>>);

impl SystemHost for FakeSystem {
    fn go_home(&mut self) -> Result<(), HostError> {
        self.0.borrow_mut().home += 1;
        Ok(())
    }

    fn show_recents(&mut self) -> Result<(), HostError> {
        let mut log = self.0.borrow_mut();
        if !log.recents_supported {
            return Err(HostError::Unsupported);
        }
        log.recents += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeHelper(pub Rc<RefCell<usize>>);

impl RecentsHelper for FakeHelper {
    fn request_open(&mut self) {
        *self.0.borrow_mut() += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeNotifier(pub Rc<RefCell<Vec<String>>>);

impl Notifier for FakeNotifier {
    fn notice(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_string());
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Store the test can keep writing to after handing it to the controller.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl AppearanceStore for SharedStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.0.borrow().get_string(key, default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0.borrow().get_int(key, default)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().set_string(key, value);
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.0.borrow_mut().set_int(key, value);
    }

    fn commit(&mut self) -> ribbon_core::Result<()> {
        self.0.borrow_mut().commit()
    }
}

// ── Rig ───────────────────────────────────────────────────────────────────────

/// A controller wired to fakes, plus handles onto every fake.
pub struct Rig {
    pub controller: OverlayController,
    pub window:     FakeWindowHost,
    pub audio:      FakeAudio,
    pub system:     FakeSystem,
    pub helper:     FakeHelper,
    pub notices:    FakeNotifier,
    pub clock:      ManualScheduler,
    pub store:      SharedStore,
}

impl Rig {
    pub fn new(config: RibbonConfig, store: MemoryStore) -> Self {
        Self::with_window(config, store, FakeWindowHost::default())
    }

    pub fn with_window(config: RibbonConfig, store: MemoryStore, window: FakeWindowHost) -> Self {
        let audio = FakeAudio::new(7, 15);
        let system = FakeSystem::default();
        let helper = FakeHelper::default();
        let notices = FakeNotifier::default();
        let clock = ManualScheduler::new();
        let store = SharedStore(Rc::new(RefCell::new(store)));

        let controller = OverlayController::new(
            &config,
            Collaborators {
                window:    Box::new(window.clone()),
                audio:     Box::new(audio.clone()),
                system:    Box::new(system.clone()),
                recents:   Box::new(helper.clone()),
                notifier:  Box::new(notices.clone()),
                scheduler: Box::new(clock.clone()),
                store:     Box::new(store.clone()),
            },
        );

        Self { controller, window, audio, system, helper, notices, clock, store }
    }

    /// Started rig with default config and an empty store.
    pub fn started() -> Self {
        let mut rig = Self::new(RibbonConfig::default(), MemoryStore::new());
        rig.controller.start().expect("start");
        rig
    }

    pub fn input(&mut self, event: InputEvent) -> bool {
        self.controller.handle(Message::Input(event))
    }

    /// Advance virtual time, feeding every firing through the controller.
    pub fn advance(&mut self, by: Duration) {
        for msg in self.clock.advance(by) {
            self.controller.handle(msg);
        }
    }
}
