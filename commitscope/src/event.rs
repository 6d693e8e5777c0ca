//! Event bus for commitscope.
//!
//! Terminal input, render ticks and the result of the background log load are
//! normalised into a single `AppEvent` enum and sent over a tokio unbounded
//! MPSC channel. The main loop receives from this channel and dispatches.
//!
//! Rendering runs on its own interval (33 ms ≈ 30 FPS). State only changes in
//! response to input, so there is no separate logic tick.

use std::path::PathBuf;
use std::time::Duration;

use commitscope_core::{load_log, Dataset, LoadError};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (press, drag, release, move, wheel).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Render tick: triggers one `terminal.draw()` call.
    Render,
    /// The change log finished loading, successfully or not.
    Loaded(Box<Result<Dataset, LoadError>>),
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Send half; clone this for each background task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half, owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that forwards terminal input and render ticks.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream. Key
/// release and repeat events are dropped so every keystroke arrives once. Send
/// errors are ignored: a dropped receiver means the app is shutting down.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = render_tick => {
                    if tx.send(AppEvent::Render).is_err() {
                        break;
                    }
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Loads the change log at `path` in the background and reports the outcome
/// as a single [`AppEvent::Loaded`].
pub fn spawn_load_task(tx: mpsc::UnboundedSender<AppEvent>, path: PathBuf) {
    tokio::spawn(async move {
        let result = load_log(&path).await;
        let _ = tx.send(AppEvent::Loaded(Box::new(result)));
    });
}
