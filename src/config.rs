//! User configuration: keybindings, picker tuning and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/liftlog/config.toml` (default `~/.config/liftlog/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::core::picker::PickerConfig;

// ───────────────────────────────────────── actions ───────────

/// Configurable actions on the workout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PickWeight,
    LogSet,
    ResetWeight,
    DeleteLastSet,
    NextExercise,
    PrevExercise,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::PickWeight,
        Action::LogSet,
        Action::ResetWeight,
        Action::DeleteLastSet,
        Action::NextExercise,
        Action::PrevExercise,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::PickWeight => "pick_weight",
            Action::LogSet => "log_set",
            Action::ResetWeight => "reset_weight",
            Action::DeleteLastSet => "delete_last_set",
            Action::NextExercise => "next_exercise",
            Action::PrevExercise => "prev_exercise",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys understood in the config file.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Delete", KeyCode::Delete),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Space", KeyCode::Char(' ')),
];

/// A key code plus CTRL/ALT/SHIFT modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn modifier_mask() -> KeyModifiers {
        KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
    }

    /// Platform-specific modifiers like SUPER are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = Self::modifier_mask();
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Config-file spelling, also used in the hint bar (`Ctrl+c`, `Space`).
    pub fn label(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        match NAMED_KEYS.iter().find(|(_, code)| *code == self.code) {
            Some((name, _)) => s.push_str(name),
            None => match self.code {
                KeyCode::Char(c) => s.push(c),
                KeyCode::F(n) => s.push_str(&format!("F{n}")),
                other => s.push_str(&format!("{other:?}")),
            },
        }
        s
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"F5"`.
    fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.pop()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let lower = key_part.to_lowercase();
        let code = if let Some((_, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.to_lowercase() == lower)
        {
            *code
        } else if let Some(n) = lower.strip_prefix('f').filter(|n| !n.is_empty()) {
            KeyCode::F(n.parse().ok()?)
        } else {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Physics shared by the weight and rep pickers.
    pub picker: PickerConfig,
    /// Animation frame interval.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            picker: PickerConfig::default(),
            frame_ms: 16,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PickWeight, vec![KeyBind::new(Char('w'), n), KeyBind::new(Enter, n)]);
        m.insert(LogSet, vec![KeyBind::new(Char(' '), n), KeyBind::new(Char('s'), n)]);
        m.insert(ResetWeight, vec![KeyBind::new(Char('r'), n)]);
        m.insert(DeleteLastSet, vec![KeyBind::new(Char('d'), n), KeyBind::new(Delete, n)]);
        m.insert(NextExercise, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(PrevExercise, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Action bound to `event`.  When several match, the binding with the
    /// most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(action, binds)| binds.iter().map(move |b| (*action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].label(),
            _ => "?".into(),
        }
    }

    /// Hint bar text built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: weight | {}: log set | {}/{}: exercise | {}: undo | {}: quit",
            self.short_binding(Action::PickWeight),
            self.short_binding(Action::LogSet),
            self.short_binding(Action::PrevExercise),
            self.short_binding(Action::NextExercise),
            self.short_binding(Action::DeleteLastSet),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("failed to read {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write the config to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if config.apply_setting(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Apply a non-binding setting.  Returns `false` for unknown keys.
    /// Unparseable values keep the default; parsed ones are clamped.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        let picker = &mut self.picker;
        let number = value.parse::<f64>().ok().filter(|v| v.is_finite());
        match key {
            "sensitivity" => {
                if let Some(v) = number {
                    picker.sensitivity = v.clamp(0.1, 5.0);
                }
            }
            "momentum_threshold" => {
                if let Some(v) = number {
                    picker.momentum_threshold = v.clamp(0.0, 10_000.0);
                }
            }
            "momentum_damping" => {
                if let Some(v) = number {
                    picker.momentum_damping = v.clamp(0.0, 2.0);
                }
            }
            "momentum_duration_ms" => {
                if let Some(v) = number {
                    picker.momentum_duration_ms = v.clamp(0.0, 2_000.0);
                }
            }
            "snap_duration_ms" => {
                if let Some(v) = number {
                    picker.snap_duration_ms = v.clamp(0.0, 2_000.0);
                }
            }
            "visible_rows" => {
                if let Ok(v) = value.parse::<u16>() {
                    // Odd, so there is a single centre row.
                    picker.visible_rows = v.clamp(3, 15) | 1;
                }
            }
            "frame_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.frame_ms = v.clamp(8, 100);
                }
            }
            _ => return false,
        }
        true
    }

    fn serialise(&self) -> String {
        let p = &self.picker;
        let mut lines = vec![
            "# liftlog configuration".to_string(),
            String::new(),
            "# Picker physics".to_string(),
            format!("sensitivity = {}", p.sensitivity),
            format!("momentum_threshold = {}", p.momentum_threshold),
            format!("momentum_damping = {}", p.momentum_damping),
            format!("momentum_duration_ms = {}", p.momentum_duration_ms),
            format!("snap_duration_ms = {}", p.snap_duration_ms),
            format!("visible_rows = {}", p.visible_rows),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::label).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/liftlog/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("liftlog").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_picker_settings_and_clamps() {
        let config = AppConfig::parse_config(
            "sensitivity = 0.6\n\
             momentum_threshold = 35\n\
             momentum_damping = 9\n\
             visible_rows = 4\n\
             frame_ms = 1\n\
             snap_duration_ms = nope\n",
        );
        assert_eq!(config.picker.sensitivity, 0.6);
        assert_eq!(config.picker.momentum_threshold, 35.0);
        assert_eq!(config.picker.momentum_damping, 2.0);
        assert_eq!(config.picker.visible_rows, 5);
        assert_eq!(config.frame_ms, 8);
        assert_eq!(
            config.picker.snap_duration_ms,
            PickerConfig::default().snap_duration_ms
        );
    }

    #[test]
    fn bindings_override_defaults() {
        let config = AppConfig::parse_config(
            "# comment\n[bindings]\nlog_set = Ctrl+s, \"x\"\nquit = bogus+q\nnot_an_action = z\n",
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::LogSet)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::LogSet)
        );
        // The default `s` binding was replaced.
        assert_eq!(config.match_key(key(KeyCode::Char('s'), KeyModifiers::NONE)), None);
        // An unparseable value keeps the default.
        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn key_labels_parse_back() {
        for label in ["Ctrl+c", "Alt+Up", "Space", "q", "F5", "Shift+Tab", "PageDown"] {
            let bind = KeyBind::parse(label).unwrap();
            assert_eq!(bind.label(), label);
        }
        assert_eq!(KeyBind::parse("ctrl+ENTER").unwrap().label(), "Ctrl+Enter");
        assert!(KeyBind::parse("Hyper+x").is_none());
        assert!(KeyBind::parse("xy").is_none());
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.picker.sensitivity = 1.5;
        config.frame_ms = 33;
        let reparsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(reparsed.picker, config.picker);
        assert_eq!(reparsed.frame_ms, 33);
        assert_eq!(reparsed.bindings, config.bindings);
    }

    #[test]
    fn hint_uses_first_binding() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("w: weight | Space: log set"));
    }
}
