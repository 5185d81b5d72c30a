//! JSON preset loading (feature `serde`).
//!
//! Parsing only checks JSON syntax and value types. Missing keys are left as
//! `None` and reported later by the `resolve_*` methods. `blur_size` also
//! accepts whole-number floats such as `9.0`.

use crate::preset::Preset;
use crate::util::{BandMixError, BandMixResult};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use std::fmt;
use std::fs;
use std::path::Path;

/// Parses a preset document from a JSON string.
pub fn preset_from_str(text: &str) -> BandMixResult<Preset> {
    serde_json::from_str(text).map_err(|err| BandMixError::PresetParse {
        reason: err.to_string(),
    })
}

/// Reads and parses a preset document from disk.
pub fn load_preset<P: AsRef<Path>>(path: P) -> BandMixResult<Preset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| BandMixError::PresetIo {
        reason: format!("cannot read {}: {err}", path.display()),
    })?;
    preset_from_str(&text)
}

struct BlurSizeVisitor;

impl<'de> Visitor<'de> for BlurSizeVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole-number `blur_size`")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // 2^63 is exactly representable; anything at or above it overflows i64.
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(Some(v as i64))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

pub(crate) fn deserialize_blur_size<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<i64>, D::Error> {
    d.deserialize_option(BlurSizeVisitor)
}
