//! Configuration system for the daynote CLI.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DAYNOTE_*)
//! 3. User global (~/.config/daynote/config.yaml)
//! 4. Built-in defaults (lowest priority)
//!
//! This module provides:
//! - `Config` struct with all settings
//! - `EnvVar` registry for documentation
//! - Helper functions for env var parsing
//! - Config loading and merging
//! - Path resolution for the daily note and thought log

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clock::{self, DateStyle};
use crate::note::HeaderRule;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration for the daynote CLI.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Where the note files live
    pub notes: NotesConfig,
    /// Note file conventions (date spelling, heading rule)
    pub note: NoteConfig,
    /// External applications the commands talk to
    pub collaborators: CollaboratorsConfig,
    /// Behavior settings
    pub behavior: BehaviorConfig,
}

/// Note file locations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NotesConfig {
    /// Daily-notes directory (null = ~/Daily Notes)
    pub dir: Option<String>,
    /// Thought-log file name inside the notes directory
    pub thought_log: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            thought_log: "thought log.txt".to_string(),
        }
    }
}

/// Note file conventions.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NoteConfig {
    /// Date spelling for file names, headings, and stamps
    pub date_style: DateStyle,
    /// How section content relates to its heading line
    pub header_rule: HeaderRule,
}

/// External collaborator applications. All calls to these are
/// fire-and-forget; failures never affect the note mutation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CollaboratorsConfig {
    /// URL prefix of the current-task menu-bar display
    pub task_url: String,
    /// Countdown timer application binary
    pub timer_app: String,
    /// Process pattern used to detect/stop a running timer
    pub timer_match: String,
    /// Macro triggered by `daynote start`
    pub entry_macro: String,
    /// Editor application used to raise the thought log
    pub editor_app: String,
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            task_url: "one-thing:?text=".to_string(),
            timer_app: "/Applications/AS TimerPRO.app/Contents/MacOS/AS TimerPRO".to_string(),
            timer_match: "AS TimerPRO.app".to_string(),
            entry_macro: "Thought log entry".to_string(),
            editor_app: "Visual Studio Code".to_string(),
        }
    }
}

/// Behavior defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress hints
    pub quiet: bool,
}

// ============================================================================
// Config Source Tracking
// ============================================================================

/// Source of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in default
    Default,
    /// User global config (~/.config/daynote/config.yaml)
    UserGlobal,
    /// Environment variable
    EnvVar(String),
    /// CLI flag
    CliFlag,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::UserGlobal => write!(f, "~/.config/daynote/config.yaml"),
            ConfigSource::EnvVar(name) => write!(f, "${}", name),
            ConfigSource::CliFlag => write!(f, "CLI flag"),
        }
    }
}

// ============================================================================
// Environment Variable Registry
// ============================================================================

/// Environment variable definition for documentation.
pub struct EnvVar {
    /// Variable name (e.g., "DAYNOTE_DIR")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default value or behavior
    pub default: &'static str,
    /// Config path this maps to (e.g., "notes.dir")
    pub config_path: &'static str,
    /// Valid values (if enumerable)
    pub values: Option<&'static str>,
}

/// Registry of all supported environment variables.
pub const ENV_VARS: &[EnvVar] = &[
    EnvVar {
        name: "NO_COLOR",
        description: "Disable colored output (standard)",
        default: "unset",
        config_path: "display.color",
        values: Some("any non-empty value"),
    },
    EnvVar {
        name: "FORCE_COLOR",
        description: "Force colored output even when not a TTY",
        default: "unset",
        config_path: "display.color",
        values: Some("any non-empty value"),
    },
    EnvVar {
        name: "DAYNOTE_DIR",
        description: "Daily-notes directory",
        default: "~/Daily Notes",
        config_path: "notes.dir",
        values: Some("path"),
    },
    EnvVar {
        name: "DAYNOTE_DATE_STYLE",
        description: "Date spelling for file names, headings, and stamps",
        default: "padded",
        config_path: "note.date_style",
        values: Some("padded, plain"),
    },
    EnvVar {
        name: "DAYNOTE_HEADER_RULE",
        description: "Section heading convention",
        default: "verified",
        config_path: "note.header_rule",
        values: Some("verified, fixed"),
    },
    EnvVar {
        name: "DAYNOTE_QUIET",
        description: "Suppress hint messages",
        default: "false",
        config_path: "behavior.quiet",
        values: Some("1, true, yes"),
    },
];

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Parse a boolean environment variable.
///
/// Returns `Some(true)` if the variable is set to a truthy value (1, true, yes),
/// `Some(false)` if set to a falsy value (0, false, no),
/// and `None` if unset or empty.
pub fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| {
        if v.is_empty() {
            return None;
        }
        let lower = v.to_lowercase();
        match lower.as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    })
}

/// Parse a string environment variable.
///
/// Returns `Some(value)` if set and non-empty, `None` otherwise.
pub fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ============================================================================
// Config Loading
// ============================================================================

/// Load configuration from all sources.
///
/// Resolution order (later overrides earlier):
/// 1. Built-in defaults
/// 2. User global (~/.config/daynote/config.yaml)
///
/// Does not apply CLI flags (those are handled by args resolution).
/// Does not apply ENV vars (those are checked at point of use).
pub fn load_config() -> LoadedConfig {
    let mut config = Config::default();
    let mut sources = vec![ConfigSource::Default];

    if let Some(user_config_path) = user_config_path()
        && let Some(user_config) = load_file(&user_config_path)
    {
        merge(&mut config, &user_config);
        sources.push(ConfigSource::UserGlobal);
    }

    LoadedConfig { config, sources }
}

/// Result of loading configuration with source tracking.
#[derive(Debug)]
pub struct LoadedConfig {
    /// The merged configuration
    pub config: Config,
    /// Sources that contributed to this config (in order of application)
    pub sources: Vec<ConfigSource>,
}

/// Get the user config file path (~/.config/daynote/config.yaml).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daynote").join("config.yaml"))
}

/// Load a config file, returning None if it doesn't exist or can't be parsed.
pub fn load_file(path: &Path) -> Option<Config> {
    let content = fs::read_to_string(path).ok()?;
    serde_yaml::from_str(&content).ok()
}

/// Merge overlay config into base config.
///
/// Non-default values in overlay override values in base.
pub fn merge(base: &mut Config, overlay: &Config) {
    let default_notes = NotesConfig::default();
    if overlay.notes.dir.is_some() {
        base.notes.dir = overlay.notes.dir.clone();
    }
    if overlay.notes.thought_log != default_notes.thought_log {
        base.notes.thought_log = overlay.notes.thought_log.clone();
    }

    let default_note = NoteConfig::default();
    if overlay.note.date_style != default_note.date_style {
        base.note.date_style = overlay.note.date_style;
    }
    if overlay.note.header_rule != default_note.header_rule {
        base.note.header_rule = overlay.note.header_rule;
    }

    let default_collab = CollaboratorsConfig::default();
    if overlay.collaborators.task_url != default_collab.task_url {
        base.collaborators.task_url = overlay.collaborators.task_url.clone();
    }
    if overlay.collaborators.timer_app != default_collab.timer_app {
        base.collaborators.timer_app = overlay.collaborators.timer_app.clone();
    }
    if overlay.collaborators.timer_match != default_collab.timer_match {
        base.collaborators.timer_match = overlay.collaborators.timer_match.clone();
    }
    if overlay.collaborators.entry_macro != default_collab.entry_macro {
        base.collaborators.entry_macro = overlay.collaborators.entry_macro.clone();
    }
    if overlay.collaborators.editor_app != default_collab.editor_app {
        base.collaborators.editor_app = overlay.collaborators.editor_app.clone();
    }

    let default_behavior = BehaviorConfig::default();
    if overlay.behavior.quiet != default_behavior.quiet {
        base.behavior.quiet = overlay.behavior.quiet;
    }
}

// ============================================================================
// Resolution helpers
// ============================================================================

/// Check if quiet mode is enabled (suppress hints).
///
/// Checks both config.behavior.quiet and DAYNOTE_QUIET env var.
pub fn is_quiet(config: &Config) -> bool {
    config.behavior.quiet || env_bool("DAYNOTE_QUIET").unwrap_or(false)
}

/// Effective date style: $DAYNOTE_DATE_STYLE overrides the config value.
pub fn date_style(config: &Config) -> DateStyle {
    match env_string("DAYNOTE_DATE_STYLE").as_deref() {
        Some("plain") => DateStyle::Plain,
        Some("padded") => DateStyle::Padded,
        _ => config.note.date_style,
    }
}

/// Effective heading rule: $DAYNOTE_HEADER_RULE overrides the config value.
pub fn header_rule(config: &Config) -> HeaderRule {
    match env_string("DAYNOTE_HEADER_RULE").as_deref() {
        Some("fixed") => HeaderRule::Fixed,
        Some("verified") => HeaderRule::Verified,
        _ => config.note.header_rule,
    }
}

/// Effective notes directory: $DAYNOTE_DIR, then notes.dir, then
/// ~/Daily Notes.
pub fn notes_dir(config: &Config) -> PathBuf {
    if let Some(dir) = env_string("DAYNOTE_DIR") {
        return expand_tilde(&dir);
    }
    if let Some(dir) = &config.notes.dir {
        return expand_tilde(dir);
    }
    dirs::home_dir().unwrap_or_default().join("Daily Notes")
}

/// Path of the daily note for the given moment:
/// `<notes_dir>/<MM-DD-YY>.txt`.
pub fn daily_note_path(config: &Config, now: DateTime<Local>) -> PathBuf {
    notes_dir(config).join(clock::note_file_name(now, date_style(config)))
}

/// Path of the thought-log file.
pub fn thought_log_path(config: &Config) -> PathBuf {
    notes_dir(config).join(&config.notes.thought_log)
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Generate JSON schema for the config.
pub fn json_schema() -> String {
    let schema = schemars::schema_for!(Config);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}

/// Generate a template config file with comments.
pub fn template_config() -> String {
    r#"# daynote configuration
# Place at ~/.config/daynote/config.yaml

# Note file locations
# notes:
#   dir: ~/Daily Notes        # null = ~/Daily Notes
#   thought_log: thought log.txt

# Note file conventions
# note:
#   date_style: padded        # padded (MM-DD-YY) or plain (M-DD-YY)
#   header_rule: verified     # verified (require ---) or fixed (skip 2 lines)

# External collaborator applications
# collaborators:
#   task_url: "one-thing:?text="
#   timer_app: /Applications/AS TimerPRO.app/Contents/MacOS/AS TimerPRO
#   timer_match: AS TimerPRO.app
#   entry_macro: Thought log entry
#   editor_app: Visual Studio Code

# Behavior settings
# behavior:
#   quiet: false
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize env var tests
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap();

        let originals: Vec<_> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(*k).ok()))
            .collect();

        // set_var is unsafe on edition 2024; ENV_MUTEX serializes access
        for (k, v) in vars {
            match v {
                Some(val) => unsafe { std::env::set_var(k, val) },
                None => unsafe { std::env::remove_var(k) },
            }
        }

        let result = f();

        for (k, original) in originals {
            match original {
                Some(val) => unsafe { std::env::set_var(k, val) },
                None => unsafe { std::env::remove_var(k) },
            }
        }

        result
    }

    #[test]
    fn test_env_bool_truthy() {
        with_env(&[("TEST_BOOL", Some("1"))], || {
            assert_eq!(env_bool("TEST_BOOL"), Some(true));
        });
        with_env(&[("TEST_BOOL", Some("true"))], || {
            assert_eq!(env_bool("TEST_BOOL"), Some(true));
        });
        with_env(&[("TEST_BOOL", Some("TRUE"))], || {
            assert_eq!(env_bool("TEST_BOOL"), Some(true));
        });
    }

    #[test]
    fn test_env_bool_falsy_and_unset() {
        with_env(&[("TEST_BOOL", Some("0"))], || {
            assert_eq!(env_bool("TEST_BOOL"), Some(false));
        });
        with_env(&[("TEST_BOOL", None)], || {
            assert_eq!(env_bool("TEST_BOOL"), None);
        });
        with_env(&[("TEST_BOOL", Some("invalid"))], || {
            assert_eq!(env_bool("TEST_BOOL"), None);
        });
    }

    #[test]
    fn test_env_string() {
        with_env(&[("TEST_STR", Some("hello"))], || {
            assert_eq!(env_string("TEST_STR"), Some("hello".to_string()));
        });
        with_env(&[("TEST_STR", Some(""))], || {
            assert_eq!(env_string("TEST_STR"), None);
        });
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.notes.thought_log, "thought log.txt");
        assert_eq!(config.note.date_style, DateStyle::Padded);
        assert_eq!(config.note.header_rule, HeaderRule::Verified);
        assert_eq!(config.collaborators.task_url, "one-thing:?text=");
        assert!(!config.behavior.quiet);
    }

    #[test]
    fn test_merge_defaults_preserved() {
        let mut base = Config::default();
        let overlay = Config::default();
        merge(&mut base, &overlay);

        assert_eq!(base.notes.thought_log, "thought log.txt");
        assert_eq!(base.note.header_rule, HeaderRule::Verified);
    }

    #[test]
    fn test_merge_overlay_wins() {
        let mut base = Config::default();
        let mut overlay = Config::default();
        overlay.note.date_style = DateStyle::Plain;
        overlay.notes.dir = Some("/tmp/notes".to_string());

        merge(&mut base, &overlay);

        assert_eq!(base.note.date_style, DateStyle::Plain);
        assert_eq!(base.notes.dir.as_deref(), Some("/tmp/notes"));
        // Other defaults unchanged
        assert_eq!(base.note.header_rule, HeaderRule::Verified);
    }

    #[test]
    fn test_config_parses_partial_yaml() {
        let config: Config = serde_yaml::from_str("note:\n  date_style: plain\n").unwrap();
        assert_eq!(config.note.date_style, DateStyle::Plain);
        assert_eq!(config.notes.thought_log, "thought log.txt");
    }

    #[test]
    fn test_notes_dir_env_override() {
        with_env(&[("DAYNOTE_DIR", Some("/tmp/override"))], || {
            let config = Config::default();
            assert_eq!(notes_dir(&config), PathBuf::from("/tmp/override"));
        });
    }

    #[test]
    fn test_date_style_env_override() {
        with_env(&[("DAYNOTE_DATE_STYLE", Some("plain"))], || {
            let config = Config::default();
            assert_eq!(date_style(&config), DateStyle::Plain);
        });
        with_env(&[("DAYNOTE_DATE_STYLE", None)], || {
            let config = Config::default();
            assert_eq!(date_style(&config), DateStyle::Padded);
        });
    }

    #[test]
    fn test_header_rule_env_override() {
        with_env(&[("DAYNOTE_HEADER_RULE", Some("fixed"))], || {
            let config = Config::default();
            assert_eq!(header_rule(&config), HeaderRule::Fixed);
        });
    }

    #[test]
    fn test_json_schema_generates() {
        let schema = json_schema();
        assert!(schema.contains("Config"));
        assert!(schema.contains("CollaboratorsConfig"));
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Default.to_string(), "default");
        assert_eq!(
            ConfigSource::EnvVar("DAYNOTE_DIR".to_string()).to_string(),
            "$DAYNOTE_DIR"
        );
    }

    #[test]
    fn test_template_config() {
        let template = template_config();
        assert!(template.contains("# daynote configuration"));
        assert!(template.contains("notes:"));
        assert!(template.contains("collaborators:"));
    }
}
