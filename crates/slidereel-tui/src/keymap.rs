use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use slidereel_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Key code plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Key-to-action lookup built from [`KeymapConfig`]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action bound to the "gg" sequence, if any
    double_g: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut double_g = None;

        let mut bind = |notation: &str, action: Action| {
            if notation == "gg" {
                double_g = Some(action);
                return;
            }

            let Some(binding) = parse_key_binding(notation) else {
                warn!("Invalid key binding '{}' for {:?}, ignored", notation, action);
                return;
            };

            if let Some(existing) = bindings.get(&binding) {
                warn!(
                    "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                    notation, existing, action
                );
            } else {
                bindings.insert(binding, action);
            }
        };

        bind(&config.quit, Action::Quit);
        bind(&config.next_slide, Action::NextSlide);
        bind(&config.prev_slide, Action::PrevSlide);
        bind(&config.first_slide, Action::FirstSlide);
        bind(&config.last_slide, Action::LastSlide);
        bind(&config.toggle_rtl, Action::ToggleRtl);
        bind(&config.cycle_replay, Action::CycleReplay);
        bind(&config.hide_slide, Action::HideSlide);
        bind(&config.show_all, Action::ShowAll);
        bind(&config.toggle_autoplay, Action::ToggleAutoplay);
        bind(&config.reload, Action::Reload);

        // Always available
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        for (code, action) in [
            (KeyCode::Right, Action::NextSlide),
            (KeyCode::Down, Action::NextSlide),
            (KeyCode::Left, Action::PrevSlide),
            (KeyCode::Up, Action::PrevSlide),
            (KeyCode::Home, Action::FirstSlide),
            (KeyCode::End, Action::LastSlide),
        ] {
            bindings.entry(KeyBinding::simple(code)).or_insert(action);
        }

        Self { bindings, double_g }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action completing a "gg" sequence
    pub fn double_g_action(&self) -> Option<&Action> {
        self.double_g.as_ref()
    }

    /// Whether a plain `g` starts a sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.double_g.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse Vim-style key notation
///
/// `"l"`, `"G"` (Shift+g), `"<C-n>"`, `"<S-Tab>"`, `"<CR>"`, `"<Space>"`,
/// `"<Right>"`, `"<F5>"`.
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }

    parse_key_name(inner).map(KeyBinding::simple)
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => {
            if let Some(number) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&number).then_some(KeyCode::F(number));
            }

            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_shifted() {
        assert_eq!(
            parse_key_binding("l"),
            Some(KeyBinding::simple(KeyCode::Char('l')))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(KeyBinding::shift(KeyCode::Char('G')))
        );
        assert_eq!(parse_key_binding("ll"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_parse_special_notation() {
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<C-N>"),
            Some(KeyBinding::ctrl(KeyCode::Char('n')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
        assert_eq!(
            parse_key_binding("<F5>"),
            Some(KeyBinding::simple(KeyCode::F(5)))
        );
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('l'))),
            Some(&Action::NextSlide)
        );
        assert_eq!(
            keymap.get(&KeyBinding::shift(KeyCode::Char('G'))),
            Some(&Action::LastSlide)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char(' '))),
            Some(&Action::ToggleAutoplay)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Left)),
            Some(&Action::PrevSlide)
        );
        assert_eq!(keymap.double_g_action(), Some(&Action::FirstSlide));
        assert!(keymap.is_g_prefix(&KeyBinding::simple(KeyCode::Char('g'))));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            prev_slide: "l".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('l'))),
            Some(&Action::NextSlide)
        );
    }

    #[test]
    fn test_arrow_keys_yield_to_config() {
        let config = KeymapConfig {
            toggle_rtl: "<Right>".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Right)),
            Some(&Action::ToggleRtl)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Down)),
            Some(&Action::NextSlide)
        );
    }
}
