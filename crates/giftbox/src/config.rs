use crate::unbox::MotionPreference;
use confetti::BrandToken;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MotionSetting {
    /// Follow the desktop accessibility signal.
    #[default]
    #[strum(serialize = "system", serialize = "auto")]
    System,
    #[strum(serialize = "reduce", serialize = "reduced")]
    Reduce,
    #[strum(serialize = "full", serialize = "no-preference")]
    Full,
}

impl MotionSetting {
    pub fn resolve(self, system_reduced: bool) -> MotionPreference {
        match self {
            Self::System => MotionPreference::from(system_reduced),
            Self::Reduce => MotionPreference::Reduced,
            Self::Full => MotionPreference::Full,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub preference: MotionSetting,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShakeConfig {
    pub period_ms: u64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            period_ms: crate::unbox::SHAKE_PERIOD.as_millis() as u64,
        }
    }
}

impl ShakeConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfettiConfig {
    pub brand: BrandToken,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    pub box_body: Option<PathBuf>,
    pub lid: Option<PathBuf>,
    pub brand_mark: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub motion: MotionConfig,
    pub audio: AudioConfig,
    pub shake: ShakeConfig,
    pub confetti: ConfettiConfig,
    pub assets: AssetsConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "giftbox").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(
            config::Environment::with_prefix("GIFTBOX")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    finish(builder().add_source(config::File::from(config_path).required(false)))
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    finish(builder().add_source(config::File::from_str(toml, config::FileFormat::Toml)))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_setting_deserialization() {
        let cases = vec![
            ("\"system\"", MotionSetting::System),
            ("\"AUTO\"", MotionSetting::System),
            ("\"reduce\"", MotionSetting::Reduce),
            ("\"Reduced\"", MotionSetting::Reduce),
            ("\"full\"", MotionSetting::Full),
            ("\"no-preference\"", MotionSetting::Full),
        ];

        for (json, expected) in cases {
            let deserialized: MotionSetting = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<MotionSetting>("\"sometimes\"").is_err());
    }

    #[test]
    fn test_motion_setting_resolution() {
        assert_eq!(MotionSetting::System.resolve(true), MotionPreference::Reduced);
        assert_eq!(MotionSetting::System.resolve(false), MotionPreference::Full);
        assert_eq!(MotionSetting::Full.resolve(true), MotionPreference::Full);
        assert_eq!(MotionSetting::Reduce.resolve(false), MotionPreference::Reduced);
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed = parse_config(
            "[motion]\npreference = \"reduce\"\n\n[confetti]\nbrand = \"RUST\"\n",
        )
        .unwrap();
        assert_eq!(parsed.motion.preference, MotionSetting::Reduce);
        assert_eq!(parsed.confetti.brand.glyph_count(), 4);
        assert_eq!(parsed.audio, AudioConfig::default());
        assert_eq!(parsed.shake.period(), Duration::from_millis(3000));
    }

    #[test]
    fn test_empty_brand_is_rejected() {
        assert!(parse_config("[confetti]\nbrand = \"\"\n").is_err());
    }
}
