//! Optimizer collaborator
//!
//! The engine treats optimization as an opaque `markup -> markup` function.
//! `PrefixIds` is the default: it namespaces element ids with the asset name
//! and strips markup that never renders.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("XML error: {0}")]
    Xml(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Prepended to every id as `<id_prefix>__<id>`.
    pub id_prefix: String,
}

pub trait Optimizer {
    fn optimize(&self, svg: &str, options: &OptimizeOptions) -> Result<String, OptimizeError>;
}

/// Returns the markup unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Optimizer for Passthrough {
    fn optimize(&self, svg: &str, _options: &OptimizeOptions) -> Result<String, OptimizeError> {
        Ok(svg.to_string())
    }
}

/// Rewrites ids and their references, drops the XML declaration, DOCTYPE,
/// comments, processing instructions and whitespace-only text. The root's
/// `width`/`height` go too when a `viewBox` is present, so the icon scales
/// with `mask-size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixIds;

impl Optimizer for PrefixIds {
    fn optimize(&self, svg: &str, options: &OptimizeOptions) -> Result<String, OptimizeError> {
        let prefix = options.id_prefix.as_str();
        let mut reader = Reader::from_str(svg);
        let mut writer = Writer::new(Vec::new());
        let mut seen_root = false;

        loop {
            let event = match reader.read_event().map_err(xml_error)? {
                Event::Start(start) => {
                    let is_root = !std::mem::replace(&mut seen_root, true);
                    Event::Start(prefix_element(&start, prefix, is_root)?)
                }
                Event::Empty(start) => {
                    let is_root = !std::mem::replace(&mut seen_root, true);
                    Event::Empty(prefix_element(&start, prefix, is_root)?)
                }
                Event::End(end) => Event::End(end),
                Event::Text(text) => {
                    if text.iter().all(|b| b.is_ascii_whitespace()) {
                        continue;
                    }
                    Event::Text(text)
                }
                Event::CData(cdata) => Event::CData(cdata),
                Event::Eof => break,
                _ => continue,
            };
            writer.write_event(event).map_err(xml_error)?;
        }

        let bytes = writer.into_inner();
        Ok(std::str::from_utf8(&bytes)?.to_string())
    }
}

fn prefix_element(
    start: &BytesStart<'_>,
    prefix: &str,
    is_root: bool,
) -> Result<BytesStart<'static>, OptimizeError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = BytesStart::new(name);

    let mut attrs = vec![];
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        attrs.push((key, value));
    }

    let drop_dimensions = is_root && attrs.iter().any(|(key, _)| key == "viewBox");

    for (key, value) in &attrs {
        if drop_dimensions && (key == "width" || key == "height") {
            continue;
        }
        let value = match key.as_str() {
            "id" => format!("{}__{}", prefix, value),
            "href" | "xlink:href" if value.starts_with('#') => {
                format!("#{}__{}", prefix, &value[1..])
            }
            _ => value.replace("url(#", &format!("url(#{}__", prefix)),
        };
        element.push_attribute((key.as_str(), value.as_str()));
    }

    Ok(element)
}

fn xml_error(e: impl std::fmt::Display) -> OptimizeError {
    OptimizeError::Xml(e.to_string())
}
