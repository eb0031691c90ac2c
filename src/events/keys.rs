/// User actions reachable from both buttons and the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    ToggleMode,
    ToggleDebug,
    ToggleQuality,
    DismissPhoto,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<UiAction> {
    match key {
        " " => Some(UiAction::ToggleMode),
        "h" | "H" => Some(UiAction::ToggleDebug),
        "q" | "Q" => Some(UiAction::ToggleQuality),
        "Escape" => Some(UiAction::DismissPhoto),
        _ => None,
    }
}

/// Keys whose browser default (page scroll) must be suppressed.
#[inline]
pub fn prevents_default(action: UiAction) -> bool {
    matches!(action, UiAction::ToggleMode)
}
