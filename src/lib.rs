//! SVG in CSS Core - masked icon stylesheet engine
//!
//! # Guarantees
//! 1. Deterministic Output: same assets and settings, same bytes
//! 2. Source Of Truth Only: configs persist inputs, never generated CSS
//! 3. Fail Closed: an invalid config never touches live state
//! 4. Atomic Restore: settings and assets are swapped together

pub mod encode;
pub mod asset;
pub mod optimize;
pub mod settings;
pub mod generate;
pub mod validation;
pub mod config;
pub mod state;

pub use encode::{encode_svg, data_uri, decode, DecodeError};
pub use asset::{SvgAsset, is_valid_name, sanitize_name};
pub use optimize::{Optimizer, OptimizeOptions, OptimizeError, Passthrough, PrefixIds};
pub use settings::{Settings, Size, CONFIG_VERSION};
pub use generate::generate_css;
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, Validator};
pub use config::{ConfigDocument, ConfigError, serialize, validate, is_valid_config, restore, parse_config};
pub use state::{AppState, StateError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
