//! 事件源：终端输入 + 终止信号
//!
//! The event loop pulls `AppEvent`s from an `EventSource`. The crossterm
//! source polls the terminal with a timeout so pending signals are noticed
//! even when no key is pressed.

use super::crossterm::into_input_event;
use super::terminal_guard::TerminationSignal;
use crate::core::event::InputEvent;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(InputEvent),
    /// Nothing happened within the poll interval.
    Tick,
    Terminate(TerminationSignal),
}

pub trait EventSource {
    /// Blocks until the next event or the poll interval elapses.
    fn next_event(&mut self) -> io::Result<AppEvent>;
}

pub struct CrosstermEventSource {
    signals: Option<Receiver<TerminationSignal>>,
}

impl CrosstermEventSource {
    pub fn new(signals: Option<Receiver<TerminationSignal>>) -> Self {
        Self { signals }
    }

    fn pending_signal(&mut self) -> Option<TerminationSignal> {
        let rx = self.signals.as_ref()?;
        match rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("signal channel closed");
                self.signals = None;
                None
            }
        }
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&mut self) -> io::Result<AppEvent> {
        if let Some(signal) = self.pending_signal() {
            return Ok(AppEvent::Terminate(signal));
        }
        if crossterm::event::poll(TICK)? {
            return Ok(AppEvent::Input(into_input_event(crossterm::event::read()?)));
        }
        Ok(AppEvent::Tick)
    }
}
