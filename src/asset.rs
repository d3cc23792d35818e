//! SVG Asset Model
//!
//! One uploaded icon: its class-name fragment plus the raw and optimized
//! markup. Markup is trusted from upload and never re-validated here.

use serde::{Deserialize, Serialize};

use crate::optimize::{OptimizeError, OptimizeOptions, Optimizer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgAsset {
    pub name: String,
    #[serde(rename = "originalSVG")]
    pub original_svg: String,
    #[serde(rename = "optimizedSVG")]
    pub optimized_svg: String,
}

impl SvgAsset {
    pub fn new(
        name: impl Into<String>,
        original_svg: impl Into<String>,
        optimized_svg: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            original_svg: original_svg.into(),
            optimized_svg: optimized_svg.into(),
        }
    }

    /// Build an asset from an uploaded file.
    ///
    /// The file stem becomes the name and doubles as the id prefix handed to
    /// the optimizer, so ids stay unique once several icons share a page.
    pub fn from_upload(
        file_name: &str,
        markup: &str,
        optimizer: &dyn Optimizer,
    ) -> Result<Self, OptimizeError> {
        let name = sanitize_name(file_stem(file_name));
        let options = OptimizeOptions { id_prefix: name.clone() };
        let optimized = optimizer.optimize(markup, &options)?;
        Ok(Self::new(name, markup, optimized))
    }

    /// Markup embedded in the stylesheet for the given optimizer setting.
    pub fn source(&self, use_optimized: bool) -> &str {
        if use_optimized {
            &self.optimized_svg
        } else {
            &self.original_svg
        }
    }

    /// Filename used when the original markup is exported.
    pub fn file_name(&self) -> String {
        format!("{}.svg", self.name)
    }
}

/// `^[A-Za-z0-9_-]+$`, enough for a CSS class fragment after a prefix.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Map an arbitrary file stem onto a valid name.
///
/// Unsafe characters become `-`; an empty result falls back to `icon`.
pub fn sanitize_name(stem: &str) -> String {
    let name: String = stem
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if name.is_empty() {
        "icon".to_string()
    } else {
        name
    }
}

fn file_stem(file_name: &str) -> &str {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    base.strip_suffix(".svg").unwrap_or(base)
}
