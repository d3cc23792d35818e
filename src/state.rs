//! Application State - single owner of settings and the asset list
//!
//! Every mutation goes through `&mut self`, so a generation pass always reads
//! a committed snapshot. Call [`AppState::css`] after a mutation to refresh
//! the stylesheet.

use serde_json::Value;
use thiserror::Error;

use crate::asset::{is_valid_name, SvgAsset};
use crate::config::{self, ConfigError};
use crate::generate::generate_css;
use crate::optimize::{OptimizeError, Optimizer};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid name {0:?}: use letters, digits, '-' or '_'")]
    InvalidName(String),

    #[error("An SVG named {0:?} already exists")]
    DuplicateName(String),

    #[error("No SVG at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Optimization failed: {0}")]
    Optimize(#[from] OptimizeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    settings: Settings,
    assets: Vec<SvgAsset>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings, assets: vec![] }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn assets(&self) -> &[SvgAsset] {
        &self.assets
    }

    pub fn has_svgs(&self) -> bool {
        !self.assets.is_empty()
    }

    /// Current stylesheet, recomputed from scratch.
    pub fn css(&self) -> String {
        generate_css(&self.assets, &self.settings)
    }

    // --- Asset list ---

    pub fn add_svg(&mut self, asset: SvgAsset) -> Result<(), StateError> {
        self.check_name(&asset.name, None)?;
        log::debug!("adding svg {:?}", asset.name);
        self.assets.push(asset);
        Ok(())
    }

    /// Create an asset from an uploaded file and append it.
    pub fn upload(
        &mut self,
        file_name: &str,
        markup: &str,
        optimizer: &dyn Optimizer,
    ) -> Result<&SvgAsset, StateError> {
        let asset = SvgAsset::from_upload(file_name, markup, optimizer)?;
        self.add_svg(asset)?;
        Ok(&self.assets[self.assets.len() - 1])
    }

    /// Rename in place. On error the model is left unchanged.
    pub fn rename_svg(&mut self, index: usize, name: &str) -> Result<(), StateError> {
        self.check_index(index)?;
        let name = name.trim();
        self.check_name(name, Some(index))?;
        log::debug!("renaming svg {:?} to {:?}", self.assets[index].name, name);
        self.assets[index].name = name.to_string();
        Ok(())
    }

    pub fn remove_svg(&mut self, index: usize) -> Result<SvgAsset, StateError> {
        self.check_index(index)?;
        Ok(self.assets.remove(index))
    }

    pub fn remove_all_svgs(&mut self) {
        self.assets.clear();
    }

    /// Stable, case-insensitive sort by name.
    pub fn sort_alphabetically(&mut self) {
        self.assets.sort_by_key(|a| a.name.to_lowercase());
    }

    // --- Settings ---

    pub fn update_prefix(&mut self, prefix: impl Into<String>) {
        self.settings.prefix = prefix.into();
    }

    pub fn update_size(&mut self, size: impl Into<String>) {
        self.settings.size = size.into();
    }

    pub fn toggle_svgo(&mut self) {
        self.settings.enable_svgo = !self.settings.enable_svgo;
    }

    pub fn toggle_webkit_prefix(&mut self) {
        self.settings.enable_webkit_prefix = !self.settings.enable_webkit_prefix;
    }

    pub fn toggle_before_pseudo(&mut self) {
        self.settings.enable_before_pseudo = !self.settings.enable_before_pseudo;
    }

    pub fn update_preview_color(&mut self, color: impl Into<String>) {
        self.settings.preview_color = color.into();
    }

    // --- Import / export ---

    /// Replace settings and assets with a validated document, all at once.
    pub fn restore_config(&mut self, doc: Value) -> Result<(), StateError> {
        let (assets, settings) = config::restore(doc)?;
        log::debug!("restored config with {} assets", assets.len());
        self.assets = assets;
        self.settings = settings;
        Ok(())
    }

    pub fn import_config(&mut self, text: &str) -> Result<(), StateError> {
        let doc: Value = serde_json::from_str(text).map_err(ConfigError::from)?;
        self.restore_config(doc)
    }

    pub fn export_config(&self) -> Result<String, StateError> {
        Ok(config::serialize(&self.assets, &self.settings)?)
    }

    /// `(file name, original markup)` for one asset.
    pub fn export_svg(&self, index: usize) -> Result<(String, &str), StateError> {
        self.check_index(index)?;
        let asset = &self.assets[index];
        Ok((asset.file_name(), asset.original_svg.as_str()))
    }

    fn check_index(&self, index: usize) -> Result<(), StateError> {
        if index < self.assets.len() {
            Ok(())
        } else {
            Err(StateError::IndexOutOfRange { index, len: self.assets.len() })
        }
    }

    fn check_name(&self, name: &str, skip: Option<usize>) -> Result<(), StateError> {
        if name.is_empty() {
            return Err(StateError::EmptyName);
        }
        if !is_valid_name(name) {
            return Err(StateError::InvalidName(name.to_string()));
        }
        let taken = self
            .assets
            .iter()
            .enumerate()
            .any(|(i, a)| Some(i) != skip && a.name == name);
        if taken {
            return Err(StateError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}
