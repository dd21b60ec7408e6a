//! Application-level configuration loading for the wheel backend.

use std::{
    env, fs,
    io::ErrorKind,
    ops::RangeInclusive,
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ROLL_FOR_TEAMS_CONFIG_PATH";
/// Default location of the persisted pool file.
const DEFAULT_POOL_PATH: &str = "data/pool.json";

/// Wall-clock length of one spin animation.
const DEFAULT_SPIN_DURATION_MS: u64 = 3_000;
/// Pause between an assignment and the automatic follow-up spin.
const DEFAULT_CONTINUE_DELAY_MS: u64 = 1_000;
/// One guaranteed turn plus up to five extra for suspense.
const DEFAULT_EXTRA_TURNS: RangeInclusive<u32> = 1..=5;
/// Teams created at startup before the user adjusts the count.
const DEFAULT_TEAM_COUNT: usize = 2;

/// Tunables for the spin animation and the continuation controller.
#[derive(Debug, Clone)]
pub struct SpinTuning {
    /// Duration of one spin.
    pub duration: Duration,
    /// Inclusive range the number of extra full turns is drawn from.
    pub extra_turns: RangeInclusive<u32>,
    /// Whether the wheel re-spins automatically while players remain.
    pub auto_continue: bool,
    /// Delay before an automatic re-spin.
    pub continue_delay: Duration,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_SPIN_DURATION_MS),
            extra_turns: DEFAULT_EXTRA_TURNS,
            auto_continue: true,
            continue_delay: Duration::from_millis(DEFAULT_CONTINUE_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Spin animation tunables.
    pub spin: SpinTuning,
    /// Whether pool changes are written back to the pool store.
    pub persist_pool: bool,
    /// Path of the JSON file the pool store reads and writes.
    pub pool_path: PathBuf,
    /// Number of teams created at startup.
    pub default_team_count: usize,
    /// Cyclic slice palette handed to the frontend; reused when the pool
    /// outgrows it.
    pub palette: Vec<String>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// built-in defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration from file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spin: SpinTuning::default(),
            persist_pool: true,
            pool_path: PathBuf::from(DEFAULT_POOL_PATH),
            default_team_count: DEFAULT_TEAM_COUNT,
            palette: default_palette(),
        }
    }
}

/// Built-in slice palette shipped with the binary.
fn default_palette() -> Vec<String> {
    [
        "red", "blue", "green", "yellow", "purple", "orange", "pink", "cyan",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    spin: RawSpin,
    #[serde(default)]
    persist_pool: Option<bool>,
    #[serde(default)]
    pool_path: Option<PathBuf>,
    #[serde(default)]
    default_team_count: Option<usize>,
    #[serde(default)]
    palette: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the `spin` section.
struct RawSpin {
    duration_ms: Option<u64>,
    extra_turns_min: Option<u32>,
    extra_turns_max: Option<u32>,
    auto_continue: Option<bool>,
    continue_delay_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = Self::default();
        let spin_defaults = SpinTuning::default();

        let min = raw
            .spin
            .extra_turns_min
            .unwrap_or(*spin_defaults.extra_turns.start());
        let max = raw
            .spin
            .extra_turns_max
            .unwrap_or(*spin_defaults.extra_turns.end())
            .max(min);

        Self {
            spin: SpinTuning {
                duration: raw
                    .spin
                    .duration_ms
                    .map(Duration::from_millis)
                    .filter(|duration| !duration.is_zero())
                    .unwrap_or(spin_defaults.duration),
                extra_turns: min..=max,
                auto_continue: raw
                    .spin
                    .auto_continue
                    .unwrap_or(spin_defaults.auto_continue),
                continue_delay: raw
                    .spin
                    .continue_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(spin_defaults.continue_delay),
            },
            persist_pool: raw.persist_pool.unwrap_or(defaults.persist_pool),
            pool_path: raw.pool_path.unwrap_or(defaults.pool_path),
            default_team_count: raw
                .default_team_count
                .unwrap_or(defaults.default_team_count)
                .max(1),
            palette: raw
                .palette
                .filter(|palette| !palette.is_empty())
                .unwrap_or(defaults.palette),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = AppConfig::default();
        assert_eq!(config.spin.duration, Duration::from_millis(3000));
        assert_eq!(config.spin.extra_turns, 1..=5);
        assert!(config.spin.auto_continue);
        assert_eq!(config.spin.continue_delay, Duration::from_millis(1000));
        assert!(config.persist_pool);
        assert_eq!(config.default_team_count, 2);
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        let raw: RawConfig = serde_json::from_str(r#"{"palette": []}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.palette.len(), 8);
    }

    #[test]
    fn raw_config_overrides_selected_fields() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "spin": {"auto_continue": false, "extra_turns_min": 3, "extra_turns_max": 7},
                "default_team_count": 4
            }"#,
        )
        .unwrap();
        let config: AppConfig = raw.into();

        assert!(!config.spin.auto_continue);
        assert_eq!(config.spin.extra_turns, 3..=7);
        assert_eq!(config.spin.duration, Duration::from_millis(3000));
        assert_eq!(config.default_team_count, 4);
        assert!(config.persist_pool);
    }

    #[test]
    fn inverted_turn_range_is_repaired() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"spin": {"extra_turns_min": 6, "extra_turns_max": 2}}"#,
        )
        .unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.spin.extra_turns, 6..=6);
    }

    #[test]
    fn zero_duration_falls_back_to_default() {
        let raw: RawConfig = serde_json::from_str(r#"{"spin": {"duration_ms": 0}}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.spin.duration, Duration::from_millis(3000));
    }

    #[test]
    fn zero_team_count_is_bumped_to_one() {
        let raw: RawConfig = serde_json::from_str(r#"{"default_team_count": 0}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.default_team_count, 1);
    }
}
