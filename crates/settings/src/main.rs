//! ribbon-settings: edit the overlay's colours from a terminal.
//!
//! Every edit is previewed first; only a valid preview is written to the
//! appearance store and committed, which the running overlay picks up.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ribbon_config::store::{
    AppearanceStore, DEFAULT_BUTTON_COLOR, DEFAULT_RIBBON_COLOR, DEFAULT_RIBBON_TRANSPARENCY,
    KEY_BUTTON_COLOR, KEY_RIBBON_COLOR, KEY_RIBBON_TRANSPARENCY,
};
use ribbon_config::FileStore;
use ribbon_theme::{palette, Appearance, PreviewFrame, PreviewSession, PALETTE};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ribbon-settings", about = "Appearance settings for the ribbon overlay")]
struct Cli {
    /// Appearance store to edit (default: the path from ribbon.toml)
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stored values and how they render
    Show,
    /// List the named colours
    Palette,
    /// Use a named colour for the buttons
    Pick {
        name: String,
    },
    /// Edit colours and transparency, saving only a valid preview
    Set {
        /// Strip colour, `#RRGGBB` or a palette name
        #[arg(long)]
        ribbon: Option<String>,
        /// Button colour, `#RRGGBB` or a palette name
        #[arg(long)]
        button: Option<String>,
        /// Strip opacity, 0 (clear) to 255 (solid)
        #[arg(long)]
        alpha: Option<i64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let path = cli.store.unwrap_or_else(store_path);
    let mut store = FileStore::open(&path);

    let output = match cli.command {
        Command::Show => show(&store),
        Command::Palette => list_palette(),
        Command::Pick { name } => pick(&mut store, &name)?,
        Command::Set { ribbon, button, alpha } => {
            set(&mut store, ribbon.as_deref(), button.as_deref(), alpha)?
        }
    };
    print!("{output}");
    Ok(())
}

fn store_path() -> PathBuf {
    let config = ribbon_config::load(ribbon_config::default_path()).unwrap_or_else(|e| {
        warn!("Failed to load config: {e}. Using defaults.");
        Default::default()
    });
    config.store.resolved_path()
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn show(store: &dyn AppearanceStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ribbon_color        = {}", store.get_string(KEY_RIBBON_COLOR, DEFAULT_RIBBON_COLOR));
    let _ = writeln!(out, "button_color        = {}", store.get_string(KEY_BUTTON_COLOR, DEFAULT_BUTTON_COLOR));
    let _ = writeln!(
        out,
        "ribbon_transparency = {}",
        store.get_int(KEY_RIBBON_TRANSPARENCY, DEFAULT_RIBBON_TRANSPARENCY)
    );
    out.push_str(&describe(PreviewSession::from_store(store).render()));
    out
}

fn list_palette() -> String {
    PALETTE.iter().fold(String::new(), |mut out, c| {
        let _ = writeln!(out, "{:<8} {}", c.name, c.hex);
        out
    })
}

fn pick(store: &mut dyn AppearanceStore, name: &str) -> Result<String> {
    let Some(color) = palette::find(name) else {
        bail!("'{name}' is not in the palette (try `ribbon-settings palette`)");
    };
    let mut session = PreviewSession::from_store(store);
    let frame = session.set_button_text(color.hex);
    let appearance = session.save(store).context("saving button colour")?;
    info!("Button colour set to {}", color.name);
    Ok(format!("{}{}", describe(frame), saved(&appearance)))
}

fn set(
    store: &mut dyn AppearanceStore,
    ribbon: Option<&str>,
    button: Option<&str>,
    alpha: Option<i64>,
) -> Result<String> {
    let mut session = PreviewSession::from_store(store);
    let mut frame = session.render();
    if let Some(text) = ribbon {
        frame = session.set_ribbon_text(text);
    }
    if let Some(text) = button {
        frame = session.set_button_text(text);
    }
    if let Some(alpha) = alpha {
        frame = session.set_alpha(alpha);
    }

    let mut out = describe(frame);
    if let PreviewFrame::Invalid { .. } = frame {
        out.push_str("nothing saved\n");
        return Ok(out);
    }
    let appearance = session.save(store).context("saving appearance")?;
    out.push_str(&saved(&appearance));
    Ok(out)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn describe(frame: PreviewFrame) -> String {
    match frame {
        PreviewFrame::Valid { background, foreground } => {
            format!("preview: background {background}  buttons {foreground}\n")
        }
        PreviewFrame::Invalid { indicator, field } => {
            format!("preview: {indicator}  invalid {field}\n")
        }
    }
}

fn saved(appearance: &Appearance) -> String {
    format!(
        "saved: ribbon {} buttons {} alpha {}\n",
        appearance.base.to_hex(),
        appearance.button.to_hex(),
        appearance.alpha()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_config::MemoryStore;

    #[test]
    fn set_saves_a_valid_preview() {
        let mut store = MemoryStore::new();
        let out = set(&mut store, Some("#224466"), Some("yellow"), Some(200)).unwrap();

        assert!(out.contains("background #C8224466"), "{out}");
        assert_eq!(store.get_string(KEY_RIBBON_COLOR, ""), "#224466");
        assert_eq!(store.get_string(KEY_BUTTON_COLOR, ""), "#FFEB3B");
        assert_eq!(store.get_int(KEY_RIBBON_TRANSPARENCY, 0), 200);
    }

    #[test]
    fn invalid_text_shows_indicator_and_saves_nothing() {
        let mut store = MemoryStore::new();
        let out = set(&mut store, Some("notacolor"), None, Some(10)).unwrap();

        assert!(out.contains("#FFFF0000"), "{out}");
        assert!(out.contains("nothing saved"));
        assert_eq!(store.get_string(KEY_RIBBON_COLOR, "unset"), "unset");
        assert_eq!(store.get_int(KEY_RIBBON_TRANSPARENCY, -1), -1);
    }

    #[test]
    fn pick_writes_button_colour_only() {
        let mut store = MemoryStore::new();
        pick(&mut store, "Purple").unwrap();
        assert_eq!(store.get_string(KEY_BUTTON_COLOR, ""), "#9C27B0");
        assert_eq!(store.get_string(KEY_RIBBON_COLOR, ""), "#000000");

        assert!(pick(&mut store, "Magenta").is_err());
    }

    #[test]
    fn palette_lists_every_colour() {
        let listing = list_palette();
        assert_eq!(listing.lines().count(), PALETTE.len());
        assert!(listing.starts_with("Red"));
    }

    #[test]
    fn show_reports_committed_values() {
        let mut store = MemoryStore::new();
        set(&mut store, Some("blue"), None, None).unwrap();
        let out = show(&store);
        assert!(out.contains("ribbon_color        = #2196F3"), "{out}");
        assert!(out.contains("ribbon_transparency = 204"));
    }
}
