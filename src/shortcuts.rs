use druid::{KbKey, Modifiers};

/// What a key press asks the overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CopyImage,
    SaveFile,
    CopyText,
    Upload,
    ToggleAnnotate,
    Quit,
}

impl Action {
    /// Terminal actions close the app once they have run.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Action::ToggleAnnotate)
    }
}

pub fn handle_key_event(key: &KbKey, mods: Modifiers) -> Option<Action> {
    match key {
        KbKey::Escape => Some(Action::Quit),
        KbKey::Character(c) if mods.ctrl() => match c.to_lowercase().as_str() {
            "c" => Some(Action::CopyImage),
            "s" => Some(Action::SaveFile),
            "t" => Some(Action::CopyText),
            "u" => Some(Action::Upload),
            "d" => Some(Action::ToggleAnnotate),
            _ => None,
        },
        _ => None,
    }
}
