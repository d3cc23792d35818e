//! Settings - output options shared by the generator and the config file

use serde::{Deserialize, Serialize};

use crate::asset::is_valid_name;

/// Schema version embedded in every persisted config.
pub const CONFIG_VERSION: i64 = 1;

pub const DEFAULT_PREFIX: &str = "icon";
pub const DEFAULT_SIZE: &str = "1em";
pub const DEFAULT_PREVIEW_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub prefix: String,
    pub size: String,
    #[serde(rename = "enableSVGO")]
    pub enable_svgo: bool,
    pub enable_webkit_prefix: bool,
    pub enable_before_pseudo: bool,
    pub preview_color: String,
    pub config_version: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            size: DEFAULT_SIZE.to_string(),
            enable_svgo: true,
            enable_webkit_prefix: true,
            enable_before_pseudo: false,
            preview_color: DEFAULT_PREVIEW_COLOR.to_string(),
            config_version: CONFIG_VERSION,
        }
    }
}

impl Settings {
    /// Prefix used in class names; falls back to `icon` when unusable.
    pub fn effective_prefix(&self) -> &str {
        let prefix = self.prefix.trim();
        if is_valid_name(prefix) && starts_like_identifier(prefix) {
            prefix
        } else {
            DEFAULT_PREFIX
        }
    }

    pub fn dimensions(&self) -> Size {
        Size::parse(&self.size)
    }
}

/// A CSS class may not open with a digit or with `-` followed by a digit.
fn starts_like_identifier(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    match bytes {
        [first, ..] if first.is_ascii_digit() => false,
        [b'-', second, ..] if second.is_ascii_digit() => false,
        _ => true,
    }
}

/// Icon box resolved from the `size` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: String,
    pub height: String,
}

impl Size {
    /// Accepts `24px`, `1.5em`, `24` (px implied), `24px 16px`, `24x16`.
    /// Blank or unparseable input resolves to the default size.
    pub fn parse(token: &str) -> Self {
        Self::try_parse(token).unwrap_or_else(|| Self::square(DEFAULT_SIZE.to_string()))
    }

    fn try_parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let mut parts = token.split_whitespace();
        let (w, h) = match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), None) => (w, h),
            (Some(_), None, None) => split_dimensions(token).unwrap_or((token, token)),
            _ => return None,
        };

        Some(Self {
            width: with_unit(w)?,
            height: with_unit(h)?,
        })
    }

    fn square(length: String) -> Self {
        Self {
            width: length.clone(),
            height: length,
        }
    }
}

/// Split `24x16` style tokens at an `x` sitting between two digits.
fn split_dimensions(token: &str) -> Option<(&str, &str)> {
    let bytes = token.as_bytes();
    (1..bytes.len().saturating_sub(1))
        .find(|&i| {
            matches!(bytes[i], b'x' | b'X')
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit()
        })
        .map(|i| (&token[..i], &token[i + 1..]))
}

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "%", "pt", "pc", "in", "cm",
    "mm", "q",
];

/// Normalize one CSS length; `None` when it is not one.
fn with_unit(length: &str) -> Option<String> {
    let split = length
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(length.len());
    let (number, unit) = length.split_at(split);

    if number.is_empty() || number.parse::<f64>().is_err() {
        return None;
    }
    if unit.is_empty() {
        return Some(if number.parse::<f64>() == Ok(0.0) {
            number.to_string()
        } else {
            format!("{}px", number)
        });
    }
    if LENGTH_UNITS.contains(&unit.to_ascii_lowercase().as_str()) {
        Some(length.to_string())
    } else {
        None
    }
}
