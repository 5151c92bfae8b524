//! Shared GeoJSON reading and property helpers.

use std::io::Read;
use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value as JsonValue;

use crate::{SourceError, SourceResult};

/// Read a whole GeoJSON document from `path` and require a FeatureCollection.
pub fn read_collection(path: &Path) -> SourceResult<FeatureCollection> {
    let file = std::fs::File::open(path)?;
    read_collection_from(file)
}

/// Like [`read_collection`] but accepts any `Read` source.
pub fn read_collection_from<R: Read>(mut reader: R) -> SourceResult<FeatureCollection> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(SourceError::NotFeatureCollection),
    }
}

/// Non-negative integer property.  Accepts JSON numbers and numeric
/// strings (some exporters stringify 64-bit OSM ids).
pub(crate) fn id_property(feature: &Feature, index: usize, key: &'static str) -> SourceResult<Option<u64>> {
    let invalid = |reason: &str| SourceError::InvalidProperty { index, key, reason: reason.to_owned() };
    match feature.property(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| invalid("must be a non-negative integer")),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| invalid("must be a non-negative integer")),
        Some(_) => Err(invalid("must be a non-negative integer")),
    }
}

/// Optional finite, non-negative number.
pub(crate) fn length_property(feature: &Feature, index: usize, key: &'static str) -> SourceResult<Option<f64>> {
    match feature.property(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => match v.as_f64() {
            Some(x) if x.is_finite() && x >= 0.0 => Ok(Some(x)),
            _ => Err(SourceError::InvalidProperty {
                index,
                key,
                reason: "must be a finite, non-negative number".to_owned(),
            }),
        },
    }
}

/// Name property: non-blank strings (kept verbatim) and numbers.
pub(crate) fn name_property(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
