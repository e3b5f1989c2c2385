//! Keypress input for the countdown

use async_trait::async_trait;
use crossterm::event::{self, Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use futures::StreamExt;

/// What a keypress means to the refresh loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `r`: refresh now
    Refresh,
    /// `q`: quit
    Quit,
    /// Ctrl-C read as a key while the terminal is in raw mode
    Interrupt,
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'r' => Key::Refresh,
            'q' => Key::Quit,
            _ => Key::Other,
        }
    }

    /// Map a terminal key event; releases and repeats are ignored
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let key = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Interrupt
            }
            KeyCode::Char(c) => Key::from_char(c),
            _ => Key::Other,
        };
        Some(key)
    }
}

/// Source of single keypresses, read without waiting for a line terminator
#[async_trait]
pub trait KeySource: Send {
    /// The next keypress, or `None` once no more input can arrive
    async fn next_key(&mut self) -> Option<Key>;

    /// Whether the terminal must be in raw mode for keys to arrive
    fn needs_raw_mode(&self) -> bool {
        false
    }

    /// Drop keypresses that arrived before the caller started listening
    fn discard_pending(&mut self) {}
}

/// Keys from the controlling terminal
pub struct TerminalKeys {
    events: EventStream,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self {
            events: EventStream::new(),
        }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeySource for TerminalKeys {
    async fn next_key(&mut self) -> Option<Key> {
        while let Some(event) = self.events.next().await {
            match event {
                Ok(Event::Key(key_event)) => {
                    if let Some(key) = Key::from_event(&key_event) {
                        return Some(key);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::debug!("Terminal input unavailable: {}", e);
                    return None;
                }
            }
        }
        None
    }

    fn needs_raw_mode(&self) -> bool {
        true
    }

    fn discard_pending(&mut self) {
        let mut discarded = 0usize;
        while matches!(event::poll(Duration::ZERO), Ok(true)) {
            if event::read().is_err() {
                break;
            }
            discarded += 1;
        }
        if discarded > 0 {
            log::debug!("Discarded {} input events typed ahead of the countdown", discarded);
        }
    }
}

/// Used when stdin is not a terminal: no key ever arrives
#[derive(Debug, Default)]
pub struct NoKeys;

#[async_trait]
impl KeySource for NoKeys {
    async fn next_key(&mut self) -> Option<Key> {
        std::future::pending::<Option<Key>>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_refresh_and_quit_any_case() {
        assert_eq!(Key::from_char('r'), Key::Refresh);
        assert_eq!(Key::from_char('R'), Key::Refresh);
        assert_eq!(Key::from_char('q'), Key::Quit);
        assert_eq!(Key::from_char('Q'), Key::Quit);
        assert_eq!(Key::from_char('x'), Key::Other);
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let event = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&event), Some(Key::Interrupt));
        let plain = press(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(Key::from_event(&plain), Some(Key::Other));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = press(KeyCode::Char('r'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(Key::from_event(&event), None);
    }

    #[test]
    fn test_non_char_keys_are_other() {
        let event = press(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&event), Some(Key::Other));
    }

    #[tokio::test]
    async fn test_no_keys_never_yields() {
        let mut keys = NoKeys;
        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(20), keys.next_key()).await;
        assert!(waited.is_err());
        assert!(!keys.needs_raw_mode());
    }
}
