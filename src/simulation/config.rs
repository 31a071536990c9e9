//! Tunable race parameters and the store that hot-swaps them
//!
//! A configuration document is fetched from a [`ConfigSource`], validated
//! field by field into an immutable [`ConfigParameters`] snapshot, and held by
//! a [`ConfigStore`]. Reloading replaces the snapshot wholesale; a failed
//! reload leaves the previous snapshot in force.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while fetching or validating a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigError {
    /// A required field was absent (or null).
    Missing(&'static str),
    /// A field was present but violates its invariant.
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// The document could not be fetched or parsed.
    SourceUnavailable(String),
}

impl ConfigError {
    /// Dotted path of the field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Missing(field) | ConfigError::Invalid { field, .. } => Some(*field),
            ConfigError::SourceUnavailable(_) => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(field) => write!(f, "missing config field `{field}`"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
            ConfigError::SourceUnavailable(detail) => {
                write!(f, "config source unavailable: {detail}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Somewhere a configuration document can be fetched from.
///
/// Every call to [`fetch`](ConfigSource::fetch) must return the latest version
/// of the document; sources never cache.
pub trait ConfigSource: Send + Sync {
    fn fetch(&self) -> Result<Value>;

    /// Human readable name for log lines.
    fn describe(&self) -> String {
        "config source".to_string()
    }
}

/// A JSON document on disk, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn fetch(&self) -> Result<Value> {
        let text = std::fs::read_to_string(self.path())
            .map_err(|e| ConfigError::SourceUnavailable(format!("{}: {e}", self.describe())))?;
        serde_json::from_str(&text)
            .map_err(|e| ConfigError::SourceUnavailable(format!("{}: {e}", self.describe())))
    }

    fn describe(&self) -> String {
        self.path().display().to_string()
    }
}

/// An in-memory document, for embedding hosts and tests.
#[derive(Debug, Clone)]
pub struct InlineSource(pub Value);

impl InlineSource {
    pub fn new(document: Value) -> Self {
        Self(document)
    }
}

impl ConfigSource for InlineSource {
    fn fetch(&self) -> Result<Value> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline document".to_string()
    }
}

/// Engine loop pitch and volume range, mapped from speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineAudio {
    pub min_pitch: f64,
    pub max_pitch: f64,
    pub min_volume: f64,
    pub max_volume: f64,
}

/// Background music settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicAudio {
    pub volume: f64,
    /// Speed up the music as the vehicle approaches top speed.
    pub speed_control: bool,
}

/// One validated configuration snapshot. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigParameters {
    /// Throttle (and brake) rate in speed units per second.
    pub acceleration: f64,
    /// Engine drag rate in speed units per second.
    pub deceleration: f64,
    pub max_speed: f64,
    pub engine: EngineAudio,
    pub music: MusicAudio,
}

impl ConfigParameters {
    /// Fetch a document from `source` and validate it.
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        Self::from_document(&source.fetch()?)
    }

    /// Build a snapshot from a fetched document.
    ///
    /// The document layout is
    /// `{ gameplay: { acceleration, deceleration, maxSpeed },
    ///    audio: { engine: { minPitch, maxPitch, minVolume, maxVolume },
    ///             music: { volume, speedControl } } }`.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let params = Self {
            acceleration: number(doc, "gameplay.acceleration")?,
            deceleration: number(doc, "gameplay.deceleration")?,
            max_speed: number(doc, "gameplay.maxSpeed")?,
            engine: EngineAudio {
                min_pitch: number(doc, "audio.engine.minPitch")?,
                max_pitch: number(doc, "audio.engine.maxPitch")?,
                min_volume: number(doc, "audio.engine.minVolume")?,
                max_volume: number(doc, "audio.engine.maxVolume")?,
            },
            music: MusicAudio {
                volume: number(doc, "audio.music.volume")?,
                speed_control: flag(doc, "audio.music.speedControl")?,
            },
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every range and ordering invariant.
    pub fn validate(&self) -> Result<()> {
        positive("gameplay.acceleration", self.acceleration)?;
        positive("gameplay.deceleration", self.deceleration)?;
        positive("gameplay.maxSpeed", self.max_speed)?;

        let engine = &self.engine;
        positive("audio.engine.minPitch", engine.min_pitch)?;
        positive("audio.engine.maxPitch", engine.max_pitch)?;
        if engine.min_pitch > engine.max_pitch {
            return Err(ConfigError::Invalid {
                field: "audio.engine.minPitch",
                reason: format!(
                    "{} exceeds maxPitch {}",
                    engine.min_pitch, engine.max_pitch
                ),
            });
        }

        unit("audio.engine.minVolume", engine.min_volume)?;
        unit("audio.engine.maxVolume", engine.max_volume)?;
        if engine.min_volume > engine.max_volume {
            return Err(ConfigError::Invalid {
                field: "audio.engine.minVolume",
                reason: format!(
                    "{} exceeds maxVolume {}",
                    engine.min_volume, engine.max_volume
                ),
            });
        }

        unit("audio.music.volume", self.music.volume)
    }
}

fn lookup<'a>(doc: &'a Value, field: &'static str) -> Result<&'a Value> {
    field
        .split('.')
        .try_fold(doc, |node, key| node.get(key))
        .filter(|value| !value.is_null())
        .ok_or(ConfigError::Missing(field))
}

fn number(doc: &Value, field: &'static str) -> Result<f64> {
    let value = lookup(doc, field)?;
    value.as_f64().ok_or_else(|| ConfigError::Invalid {
        field,
        reason: format!("expected a number, found {value}"),
    })
}

fn flag(doc: &Value, field: &'static str) -> Result<bool> {
    let value = lookup(doc, field)?;
    value.as_bool().ok_or_else(|| ConfigError::Invalid {
        field,
        reason: format!("expected true or false, found {value}"),
    })
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite value greater than zero, got {value}"),
        })
    }
}

fn unit(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must lie within [0, 1], got {value}"),
        })
    }
}

/// Holds the active configuration snapshot.
///
/// Readers take an `Arc` handle with [`current`](ConfigStore::current) and
/// keep using it for as long as they need one consistent view; a reload only
/// replaces the handle the store gives out afterwards.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    snapshot: Arc<ConfigParameters>,
    generation: u64,
}

impl ConfigStore {
    /// Wrap an already built snapshot, validating it first.
    pub fn new(params: ConfigParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            snapshot: Arc::new(params),
            generation: 0,
        })
    }

    /// Initial load from `source`.
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        let params = ConfigParameters::load(source)?;
        info!("Loaded config from {}", source.describe());
        debug!("Config: {:?}", params);
        Ok(Self {
            snapshot: Arc::new(params),
            generation: 0,
        })
    }

    /// The last successfully loaded snapshot.
    pub fn current(&self) -> Arc<ConfigParameters> {
        Arc::clone(&self.snapshot)
    }

    /// Number of successful reloads since the initial load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Re-fetch and swap in a new snapshot. On error nothing changes.
    pub fn reload(&mut self, source: &dyn ConfigSource) -> Result<()> {
        let params = ConfigParameters::load(source)?;
        self.snapshot = Arc::new(params);
        self.generation += 1;
        info!(
            "Config reloaded from {} (generation {})",
            source.describe(),
            self.generation
        );
        debug!("Config: {:?}", self.snapshot);
        Ok(())
    }
}
