use ribbon_core::{InputEvent, PointerEvent};

/// Snapshot taken on pointer-down; lives until the matching pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub origin_window_x: i32,
    pub origin_window_y: i32,
    pub origin_touch_x:  i32,
    pub origin_touch_y:  i32,
    /// Latches once displacement exceeds the threshold on either axis.
    pub is_dragging:     bool,
}

/// What the controller should do with one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStep {
    /// `true` = swallow the event so the host doesn't also deliver a click.
    pub consumed: bool,
    /// New window position to apply, if the window moved.
    pub move_to:  Option<(i32, i32)>,
    /// `true` when the event was not a pointer event at all and should fall
    /// through to the next handler.
    pub passed:   bool,
}

impl DragStep {
    fn consumed() -> Self {
        Self { consumed: true, move_to: None, passed: false }
    }

    fn released(was_drag: bool) -> Self {
        Self { consumed: was_drag, move_to: None, passed: false }
    }

    fn pass() -> Self {
        Self { consumed: false, move_to: None, passed: true }
    }
}

/// Turns a raw pointer stream into either a tap or window moves.
///
/// Wheel events share the host's raw motion channel but are never handled
/// here; they pass straight through to the volume controller.
#[derive(Debug, Clone)]
pub struct DragController {
    threshold: i32,
    session:   Option<DragSession>,
}

impl DragController {
    pub fn new(threshold: i32) -> Self {
        Self { threshold: threshold.max(0), session: None }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Feed one event.  `window` is the window position right now.
    pub fn handle(&mut self, event: &InputEvent, window: (i32, i32)) -> DragStep {
        match event {
            InputEvent::Pointer(p) => self.on_pointer(*p, window),
            _ => DragStep::pass(),
        }
    }

    fn on_pointer(&mut self, event: PointerEvent, window: (i32, i32)) -> DragStep {
        match event {
            PointerEvent::Down { x, y } => {
                self.session = Some(DragSession {
                    origin_window_x: window.0,
                    origin_window_y: window.1,
                    origin_touch_x:  x,
                    origin_touch_y:  y,
                    is_dragging:     false,
                });
                DragStep::consumed()
            }
            PointerEvent::Move { x, y } => {
                let Some(session) = self.session.as_mut() else {
                    return DragStep::consumed();
                };

                let dx = x.saturating_sub(session.origin_touch_x);
                let dy = y.saturating_sub(session.origin_touch_y);
                let threshold = self.threshold.unsigned_abs();
                if !session.is_dragging && (dx.unsigned_abs() > threshold || dy.unsigned_abs() > threshold) {
                    session.is_dragging = true;
                }

                let move_to = session.is_dragging.then(|| {
                    (
                        session.origin_window_x.saturating_add(dx),
                        session.origin_window_y.saturating_add(dy),
                    )
                });
                DragStep { consumed: true, move_to, passed: false }
            }
            PointerEvent::Up { .. } => {
                let was_drag = self.session.take().is_some_and(|s| s.is_dragging);
                DragStep::released(was_drag)
            }
        }
    }
}
