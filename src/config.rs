//! Config Codec - export and import of the persisted JSON document
//!
//! CRITICAL: restore MUST call validate first. A rejected document never
//! yields partial state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::asset::SvgAsset;
use crate::settings::{Settings, CONFIG_VERSION};
use crate::validation::Validator;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

/// Name of the exported config file.
pub const CONFIG_FILE_NAME: &str = "svg-in-css.config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config.json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config.json: {0}")]
    Invalid(String),

    #[error("Unsupported config version {found}, expected {expected}")]
    VersionMismatch { found: Value, expected: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk layout: settings and assets flattened into one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub prefix: String,
    pub size: String,
    #[serde(rename = "enableSVGO")]
    pub enable_svgo: bool,
    pub enable_webkit_prefix: bool,
    pub enable_before_pseudo: bool,
    pub svg_list: Vec<SvgAsset>,
    pub preview_color: String,
    pub config_version: i64,
}

impl ConfigDocument {
    pub fn new(assets: &[SvgAsset], settings: &Settings) -> Self {
        Self {
            prefix: settings.prefix.clone(),
            size: settings.size.clone(),
            enable_svgo: settings.enable_svgo,
            enable_webkit_prefix: settings.enable_webkit_prefix,
            enable_before_pseudo: settings.enable_before_pseudo,
            svg_list: assets.to_vec(),
            preview_color: settings.preview_color.clone(),
            config_version: settings.config_version,
        }
    }

    pub fn into_parts(self) -> (Vec<SvgAsset>, Settings) {
        let settings = Settings {
            prefix: self.prefix,
            size: self.size,
            enable_svgo: self.enable_svgo,
            enable_webkit_prefix: self.enable_webkit_prefix,
            enable_before_pseudo: self.enable_before_pseudo,
            preview_color: self.preview_color,
            config_version: self.config_version,
        };
        (self.svg_list, settings)
    }
}

/// Pretty-printed (2-space) config JSON for the current state.
pub fn serialize(assets: &[SvgAsset], settings: &Settings) -> Result<String, ConfigError> {
    let doc = ConfigDocument::new(assets, settings);
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Structural check of an untrusted document.
///
/// This is the ONLY validation entry point.
pub fn validate(doc: &Value) -> Result<(), ConfigError> {
    #[cfg(feature = "test-hooks")]
    VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

    let result = Validator::new().validate(doc);
    if result.valid {
        return Ok(());
    }

    if result.is_version_mismatch() {
        let found = doc.get("configVersion").cloned().unwrap_or(Value::Null);
        return Err(ConfigError::VersionMismatch {
            found,
            expected: CONFIG_VERSION,
        });
    }

    Err(ConfigError::Invalid(result.summary()))
}

pub fn is_valid_config(doc: &Value) -> bool {
    validate(doc).is_ok()
}

/// Turn a validated document into assets and settings.
///
/// CRITICAL: This ALWAYS calls validate internally. No bypass possible.
pub fn restore(doc: Value) -> Result<(Vec<SvgAsset>, Settings), ConfigError> {
    validate(&doc)?;
    let doc: ConfigDocument = serde_json::from_value(doc)?;
    Ok(doc.into_parts())
}

/// Parse config text and restore it.
pub fn parse_config(text: &str) -> Result<(Vec<SvgAsset>, Settings), ConfigError> {
    let doc: Value = serde_json::from_str(text)?;
    restore(doc)
}

/// `<name>.config.json`
pub fn config_file_name(name: &str) -> String {
    format!("{}.config.json", name)
}

pub fn load_config(path: &Path) -> Result<(Vec<SvgAsset>, Settings), ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

pub fn save_config(path: &Path, assets: &[SvgAsset], settings: &Settings) -> Result<(), ConfigError> {
    let text = serialize(assets, settings)?;
    fs::write(path, text)?;
    log::debug!("wrote config with {} assets to {}", assets.len(), path.display());
    Ok(())
}

/// Write each asset's original markup to `<dir>/<name>.svg`.
pub fn write_svg_files(dir: &Path, assets: &[SvgAsset]) -> Result<Vec<PathBuf>, ConfigError> {
    fs::create_dir_all(dir)?;

    let mut written = vec![];
    for asset in assets {
        let path = dir.join(asset.file_name());
        fs::write(&path, &asset.original_svg)?;
        written.push(path);
    }

    Ok(written)
}
