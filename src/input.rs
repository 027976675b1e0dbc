use crate::app::Scene;
use crate::model::StatKey;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum UiAction {
    Care(StatKey),
    HelpToggle,
    SettingsOpen,
    SettingsMove(i32),
    SettingsActivate,
    RenameChar(char),
    RenameBackspace,
    RenameCommit,
    RenameCancel,
    Back,
    Quit,
}

pub(crate) fn collect_input_nonblocking(max_wait: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // the first poll doubles as the frame wait
    let mut timeout = max_wait;
    while event::poll(timeout)? {
        timeout = Duration::ZERO;
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_action(scene: Scene, ev: &InputEvent) -> Option<UiAction> {
    if matches!(ev.key, KeyCode::Char('c')) && ev.mods.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Quit);
    }

    if scene == Scene::Rename {
        return match ev.key {
            KeyCode::Enter => Some(UiAction::RenameCommit),
            KeyCode::Esc => Some(UiAction::RenameCancel),
            KeyCode::Backspace => Some(UiAction::RenameBackspace),
            KeyCode::Char(ch) if !ch.is_control() => Some(UiAction::RenameChar(ch)),
            _ => None,
        };
    }

    match ev.key {
        KeyCode::Char('h') | KeyCode::Char('H') => return Some(UiAction::HelpToggle),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(UiAction::Quit),
        KeyCode::Esc => return Some(UiAction::Back),
        _ => {}
    }

    match scene {
        Scene::Main => match ev.key {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(UiAction::Care(StatKey::Hydration)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(UiAction::Care(StatKey::Sunlight)),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(UiAction::Care(StatKey::Nutrients)),
            KeyCode::Tab => Some(UiAction::SettingsOpen),
            _ => None,
        },
        Scene::Settings => match ev.key {
            KeyCode::Up => Some(UiAction::SettingsMove(-1)),
            KeyCode::Down => Some(UiAction::SettingsMove(1)),
            KeyCode::Enter => Some(UiAction::SettingsActivate),
            KeyCode::Tab => Some(UiAction::Back),
            _ => None,
        },
        Scene::Help | Scene::Rename => None,
    }
}
