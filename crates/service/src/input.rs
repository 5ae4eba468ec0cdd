//! Line-oriented input script read from stdin by the headless runtime.
//!
//! ```text
//! down 120 40
//! move 180 40
//! up
//! scroll -2
//! click recents
//! seek transparency 128
//! volume 11
//! ```

use ribbon_core::{Button, InputEvent, Message, PointerEvent, Slider};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    Arguments { command: String, expected: &'static str },

    #[error("unknown button '{0}'")]
    UnknownButton(String),

    #[error("unknown slider '{0}'")]
    UnknownSlider(String),
}

/// Turns script lines into queue messages.
///
/// Remembers the last pointer position so `up` may omit its coordinates.
#[derive(Debug, Default)]
pub struct ScriptParser {
    last: (i32, i32),
}

impl ScriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line.  Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(&mut self, line: &str) -> Result<Option<Message>, ScriptError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let msg = match command {
            "down" | "move" => {
                let (x, y) = point(command, &args)?;
                self.last = (x, y);
                let ev = if command == "down" {
                    PointerEvent::Down { x, y }
                } else {
                    PointerEvent::Move { x, y }
                };
                Message::Input(InputEvent::Pointer(ev))
            }
            "up" => {
                let (x, y) = if args.is_empty() { self.last } else { point(command, &args)? };
                Message::Input(InputEvent::Pointer(PointerEvent::Up { x, y }))
            }
            "scroll" => Message::Input(InputEvent::Scroll { steps: single(command, &args)? }),
            "click" => Message::Input(InputEvent::Click(button(command, &args)?)),
            "long-press" => Message::Input(InputEvent::LongPress(button(command, &args)?)),
            "hover" => Message::Input(InputEvent::HoverEnter),
            "seek" => {
                let [name, pos] = args[..] else {
                    return Err(arguments(command, "a slider and a position"));
                };
                Message::Input(InputEvent::SeekChange {
                    slider:    slider(name)?,
                    position:  number(command, pos, "a slider and a position")?,
                    from_user: true,
                })
            }
            "seek-start" => Message::Input(InputEvent::SeekStart(slider_arg(command, &args)?)),
            "seek-stop" => Message::Input(InputEvent::SeekStop(slider_arg(command, &args)?)),
            "volume" => Message::ExternalVolume(single(command, &args)?),
            "commit" => Message::AppearanceCommitted,
            "quit" => Message::Shutdown,
            other => return Err(ScriptError::UnknownCommand(other.to_string())),
        };
        Ok(Some(msg))
    }
}

fn arguments(command: &str, expected: &'static str) -> ScriptError {
    ScriptError::Arguments { command: command.to_string(), expected }
}

fn number(command: &str, raw: &str, expected: &'static str) -> Result<i32, ScriptError> {
    raw.parse().map_err(|_| arguments(command, expected))
}

fn point(command: &str, args: &[&str]) -> Result<(i32, i32), ScriptError> {
    const EXPECTED: &str = "two integer coordinates";
    let [x, y] = args[..] else {
        return Err(arguments(command, EXPECTED));
    };
    Ok((number(command, x, EXPECTED)?, number(command, y, EXPECTED)?))
}

fn single(command: &str, args: &[&str]) -> Result<i32, ScriptError> {
    const EXPECTED: &str = "one integer";
    let [n] = args[..] else {
        return Err(arguments(command, EXPECTED));
    };
    number(command, n, EXPECTED)
}

fn button(command: &str, args: &[&str]) -> Result<Button, ScriptError> {
    let [name] = args[..] else {
        return Err(arguments(command, "a button name"));
    };
    Button::from_name(name).ok_or_else(|| ScriptError::UnknownButton(name.to_string()))
}

fn slider(name: &str) -> Result<Slider, ScriptError> {
    Slider::from_name(name).ok_or_else(|| ScriptError::UnknownSlider(name.to_string()))
}

fn slider_arg(command: &str, args: &[&str]) -> Result<Slider, ScriptError> {
    let [name] = args[..] else {
        return Err(arguments(command, "a slider name"));
    };
    slider(name)
}
