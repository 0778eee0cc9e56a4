use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        if tx.send(evt).is_err() {
                            break;
                        }
                    }
                } else if tx.is_closed() {
                    break;
                }
            }
        });

        EventHandler { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

pub fn event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_to_action(key),
        Event::Resize(_, _) => Some(Action::Render),
        Event::FocusLost => Some(Action::SaveState),
        _ => None,
    }
}

pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Backspace) => {
            Some(Action::Back)
        }
        (KeyModifiers::NONE, KeyCode::Char('j'))
        | (KeyModifiers::NONE, KeyCode::Char('l'))
        | (KeyModifiers::NONE, KeyCode::Down)
        | (KeyModifiers::NONE, KeyCode::Right)
        | (KeyModifiers::NONE, KeyCode::Tab) => Some(Action::FocusNext),
        (KeyModifiers::NONE, KeyCode::Char('k'))
        | (KeyModifiers::NONE, KeyCode::Char('h'))
        | (KeyModifiers::NONE, KeyCode::Up)
        | (KeyModifiers::NONE, KeyCode::Left)
        | (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(Action::FocusPrev),
        (KeyModifiers::NONE, KeyCode::Char('g')) => Some(Action::FocusFirst),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => Some(Action::FocusLast),
        (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            Some(Action::Activate)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(modifiers: KeyModifiers, code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(
            event_to_action(key(KeyModifiers::NONE, KeyCode::Char('j'))),
            Some(Action::FocusNext)
        );
        assert_eq!(
            event_to_action(key(KeyModifiers::SHIFT, KeyCode::BackTab)),
            Some(Action::FocusPrev)
        );
        assert_eq!(
            event_to_action(key(KeyModifiers::SHIFT, KeyCode::Char('G'))),
            Some(Action::FocusLast)
        );
        assert_eq!(
            event_to_action(key(KeyModifiers::NONE, KeyCode::Enter)),
            Some(Action::Activate)
        );
    }

    #[test]
    fn escape_is_a_back_request() {
        assert_eq!(
            event_to_action(key(KeyModifiers::NONE, KeyCode::Esc)),
            Some(Action::Back)
        );
    }

    #[test]
    fn focus_loss_saves_state() {
        assert_eq!(event_to_action(Event::FocusLost), Some(Action::SaveState));
        assert_eq!(event_to_action(Event::FocusGained), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(event_to_action(Event::Key(release)), None);
    }
}
