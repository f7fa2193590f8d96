use handball_engine::config::MatchConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Settings the CLI resolves before running a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub allow_ties: bool,
    pub half_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub allow_ties: ValueSource,
    pub half_seconds: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            allow_ties: ValueSource::Default,
            half_seconds: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let base = MatchConfig::default();
        Self {
            seed: None,
            allow_ties: base.allow_ties,
            half_seconds: base.half_duration_secs,
        }
    }
}

impl Config {
    /// Engine configuration with the resolved overrides applied.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            allow_ties: self.allow_ties,
            half_duration_secs: self.half_seconds,
            ..MatchConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves defaults, then the TOML file named by `HANDBALL_CONFIG`, then
/// `HANDBALL_*` environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HANDBALL_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.allow_ties {
            cfg.allow_ties = v;
            sources.allow_ties = ValueSource::File;
        }
        if let Some(v) = f.half_seconds {
            cfg.half_seconds = v;
            sources.half_seconds = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HANDBALL_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(ties) = std::env::var("HANDBALL_ALLOW_TIES")
        && !ties.is_empty()
    {
        cfg.allow_ties =
            parse_bool(&ties).ok_or_else(|| ConfigError::Invalid("Invalid allow_ties".into()))?;
        sources.allow_ties = ValueSource::Env;
    }
    if let Ok(half) = std::env::var("HANDBALL_HALF_SECONDS")
        && !half.is_empty()
    {
        cfg.half_seconds = half
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid half_seconds".into()))?;
        sources.half_seconds = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    allow_ties: Option<bool>,
    #[serde(default)]
    half_seconds: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.match_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
