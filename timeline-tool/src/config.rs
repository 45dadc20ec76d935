use std::io;

use egui_span_select::TrackerSettings;

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub(crate) struct Config {
    pub strip: StripConfig,
    pub tracker: TrackerSettings,
    pub egui: crate::app::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strip: StripConfig::default(),
            tracker: TrackerSettings::default(),
            egui: Default::default(),
        }
    }
}

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub(crate) struct StripConfig {
    /// Timeline length covered by the generated samples.
    pub seconds: f64,
    pub height: u32,
    pub seed: u64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            seconds: 60.0,
            height: 160,
            seed: 42,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads `path`, falling back to the defaults when the file is absent.
pub(crate) fn load(path: &str) -> Result<Config, ConfigError> {
    match std::fs::File::open(path) {
        Ok(f) => Ok(serde_json::from_reader(f)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "strip": { "seconds": 10.0 } }"#).unwrap();
        assert_eq!(config.strip.seconds, 10.0);
        assert_eq!(config.strip.height, 160);
        assert_eq!(config.tracker, TrackerSettings::default());
    }

    #[test]
    fn egui_section_parses_the_scale_override() {
        let config: Config =
            serde_json::from_str(r#"{ "egui": { "pixels_per_point": 1.5 } }"#).unwrap();
        assert_eq!(config.egui.pixels_per_point, Some(1.5));
        assert!(Config::default().egui.pixels_per_point.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("does-not-exist.json").unwrap();
        assert_eq!(config.strip.seconds, 60.0);
    }
}
