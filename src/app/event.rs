//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Input
//! is stamped with its arrival time, which the pickers use for velocity.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent, Instant),
    Mouse(MouseEvent, Instant),
    Resize(u16, u16),
    /// Nothing arrived within one frame interval.
    Tick,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            // Poll with the frame interval so animations keep stepping even
            // when nothing is happening.
            let has_event = event::poll(frame_interval).unwrap_or(false);
            let app_event = if has_event {
                let Ok(ev) = event::read() else {
                    continue;
                };
                let at = Instant::now();
                match ev {
                    CtEvent::Key(k) => AppEvent::Key(k, at),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m, at),
                    CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
