pub mod error;
pub mod event;
pub mod state;

pub use error::{HostError, Result, RibbonError};
pub use event::{Button, InputEvent, Message, PointerEvent, Slider};
pub use state::{OverlayWindowState, PanelState, Visibility, VolumeSlider, WidthMode};
