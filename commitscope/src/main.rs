//! commitscope — terminal dashboard for a repository's line-level change log.
//!
//! Entry point for the `commitscope` binary. Wires together the terminal
//! lifecycle (`tui`), the event bus (`event`), app state (`app`), rendering
//! (`ui`), the theme system (`theme`), and the engine in `commitscope-core`.
//!
//! # Startup sequence
//!
//! 1. Load `config.toml` and install the file logger, if configured. Both are
//!    done before terminal init so config problems can still reach stderr.
//! 2. `install_panic_hook()`, then `register_sigterm()`.
//! 3. `init_tui()` enters the alternate screen and raw mode.
//! 4. Spawn the input task and the log-loading task. The first frames show a
//!    loading placeholder until `AppEvent::Loaded` arrives.
//!
//! `restore_tui()` runs once after the event loop exits, whatever the reason.

mod app;
mod event;
mod theme;
mod tui;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use commitscope_core::ViewConfig;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// Log file used when no path is given on the command line.
const DEFAULT_LOG: &str = "loc.csv";

/// Environment variable holding the `tracing` filter directive.
const LOG_FILTER_ENV: &str = "COMMITSCOPE_LOG";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    /// `"observable"` or `"dark"`.
    theme: String,
    /// Where to write diagnostics. Nothing is logged when unset.
    log_file: Option<PathBuf>,
    view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "observable".to_owned(),
            log_file: None,
            view: ViewConfig::default(),
        }
    }
}

/// Returns the path to the commitscope config file.
///
/// Prefers `$XDG_CONFIG_HOME/commitscope/config.toml`; falls back to
/// `~/.config/commitscope/config.toml` when the env var is absent.
fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("commitscope").join("config.toml")
}

/// Loads the config file.
///
/// A missing file yields the defaults silently. A file that cannot be read or
/// parsed is reported on stderr and also yields the defaults: config errors
/// never prevent startup.
fn load_config() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
        Err(e) => {
            eprintln!("commitscope: cannot read {}: {}", path.display(), e);
            return Config::default();
        }
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("commitscope: config parse error in {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Installs a `tracing` subscriber writing to `log_file`.
///
/// The filter comes from `COMMITSCOPE_LOG` and defaults to `info`. Without a
/// log file nothing is installed, since stderr belongs to the TUI.
fn init_logging(log_file: Option<&Path>) {
    let Some(path) = log_file else {
        return;
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("commitscope: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = load_config();
    init_logging(config.log_file.as_deref());

    let log_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG));
    info!(path = %log_path.display(), theme = %config.theme, "starting");

    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::new(log_path.clone(), config.view);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    event::spawn_load_task(handler.tx.clone(), log_path);
    let mut rx = handler.rx;

    // Exits only via `break`, so `restore_tui()` below is always reached.
    let mut draw_error = None;
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when the
            // terminal is idle.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            draw_error = Some(e);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Loaded(result)) => state.apply_load(*result),
                    // The next render recomputes the layout from `frame.area()`.
                    Some(event::AppEvent::Resize(_, _)) => {}
                    None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    info!("exiting");
    match draw_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_table_overrides_only_the_keys_it_names() {
        let config: Config = toml::from_str(
            r#"
            theme = "dark"

            [view]
            window_size = 12
            commit_url_base = "https://example.com/site/commit/"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, "dark");
        assert_eq!(config.log_file, None);
        assert_eq!(config.view.window_size, 12);
        assert_eq!(
            config.view.commit_url_base.as_deref(),
            Some("https://example.com/site/commit/")
        );
        let defaults = ViewConfig::default();
        assert_eq!(config.view.item_height, defaults.item_height);
        assert_eq!(
            (config.view.min_radius, config.view.max_radius),
            (defaults.min_radius, defaults.max_radius)
        );
    }

    #[test]
    fn empty_file_yields_the_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "observable");
        assert_eq!(config.view, ViewConfig::default());
    }

    #[test]
    fn mistyped_value_is_a_parse_error() {
        assert!(toml::from_str::<Config>("[view]\nwindow_size = \"many\"\n").is_err());
    }
}
