use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

/// Events flowing into the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the user.
    Key(KeyEvent),
    /// The terminal was resized; the next draw picks up the new size.
    Resize(u16, u16),
}

/// Spawn the crossterm input polling task.
pub fn spawn_input_task(tx: mpsc::UnboundedSender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let has_event = tokio::task::spawn_blocking(|| {
                event::poll(Duration::from_millis(50)).unwrap_or(false)
            })
            .await
            .unwrap_or(false);

            if !has_event {
                continue;
            }

            let event = match tokio::task::spawn_blocking(event::read).await {
                Ok(Ok(event)) => event,
                _ => continue,
            };
            let forwarded = match event {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
                _ => None,
            };
            if let Some(app_event) = forwarded {
                if tx.send(app_event).is_err() {
                    break;
                }
            }
        }
    })
}
