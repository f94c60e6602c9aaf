use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    /// Nothing happened for one tick; redraw so agent-made changes show up
    Tick,
}

/// Polls the terminal on a background task and forwards input as [`Event`]s.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    shutdown_tx: mpsc::UnboundedSender<()>,
}

impl EventHandler {
    pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(tick_rate);
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticks.tick() => {
                        let next = match poll_terminal() {
                            Some(event) => event,
                            None => Event::Tick,
                        };
                        if tx.send(next).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, shutdown_tx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TICK)
    }
}

/// Drain pending terminal input, returning the first event the app cares about.
fn poll_terminal() -> Option<Event> {
    while event::poll(Duration::ZERO).unwrap_or(false) {
        match event::read() {
            // Windows reports releases too
            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                return Some(Event::Key(key))
            }
            Ok(CrosstermEvent::Resize(_, _)) => return Some(Event::Resize),
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Failed to read terminal event: {}", e);
                return None;
            }
        }
    }
    None
}
