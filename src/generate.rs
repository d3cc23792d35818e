//! CSS Generator - one masked rule per asset
//!
//! Output is a pure function of `(assets, settings)`; callers rely on
//! byte-identical output for clipboard copies and highlighting.

use std::collections::HashSet;
use std::fmt::Write;

use crate::asset::SvgAsset;
use crate::encode::data_uri;
use crate::settings::{Settings, Size};

/// Generate the stylesheet for the asset list, in list order.
///
/// Duplicate names are not corrected: the later rule wins in the browser.
pub fn generate_css(assets: &[SvgAsset], settings: &Settings) -> String {
    warn_duplicate_names(assets);

    let prefix = settings.effective_prefix();
    let size = settings.dimensions();

    assets
        .iter()
        .map(|asset| rule(asset, prefix, &size, settings))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Selector for one asset, e.g. `.icon-star` or `.icon-star::before`.
pub fn selector(prefix: &str, name: &str, before_pseudo: bool) -> String {
    if before_pseudo {
        format!(".{}-{}::before", prefix, name)
    } else {
        format!(".{}-{}", prefix, name)
    }
}

fn rule(asset: &SvgAsset, prefix: &str, size: &Size, settings: &Settings) -> String {
    let url = format!("url(\"{}\")", data_uri(asset.source(settings.enable_svgo)));
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {{", selector(prefix, &asset.name, settings.enable_before_pseudo));
    if settings.enable_before_pseudo {
        declare(&mut out, "content", "\"\"");
    }
    declare(&mut out, "display", "inline-block");
    declare(&mut out, "width", &size.width);
    declare(&mut out, "height", &size.height);
    declare(&mut out, "background-color", "currentColor");
    declare_mask(&mut out, "mask-image", &url, settings.enable_webkit_prefix);
    declare_mask(&mut out, "mask-repeat", "no-repeat", settings.enable_webkit_prefix);
    declare_mask(&mut out, "mask-size", "contain", settings.enable_webkit_prefix);
    out.push_str("}\n");

    out
}

fn declare(out: &mut String, property: &str, value: &str) {
    let _ = writeln!(out, "  {}: {};", property, value);
}

fn declare_mask(out: &mut String, property: &str, value: &str, webkit: bool) {
    if webkit {
        let _ = writeln!(out, "  -webkit-{}: {};", property, value);
    }
    declare(out, property, value);
}

fn warn_duplicate_names(assets: &[SvgAsset]) {
    let mut seen = HashSet::new();
    for asset in assets {
        if !seen.insert(asset.name.as_str()) {
            log::warn!(
                "duplicate asset name {:?}: the later rule shadows the earlier one",
                asset.name
            );
        }
    }
}
