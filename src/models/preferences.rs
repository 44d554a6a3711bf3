use std::fmt;
use std::num::IntErrorKind;

use serde::de::{self, IntoDeserializer, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Occasion, PriceRange, Season};

/// Smallest number of outfits a caller can ask for
pub const MIN_LIMIT: i64 = 1;
/// Largest number of outfits a caller can ask for
pub const MAX_LIMIT: i64 = 20;
/// Number of outfits returned when the caller does not say
pub const DEFAULT_LIMIT: i64 = 3;

/// Optional constraints applied to one recommendation request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub occasion: Option<Occasion>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<Season>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<PriceRange>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.occasion.is_none() && self.season.is_none() && self.budget.is_none()
    }
}

/// Clamps a requested outfit count into `[MIN_LIMIT, MAX_LIMIT]`
///
/// Out-of-range values are silently corrected, never rejected.
pub fn clamp_limit(requested: Option<i64>) -> usize {
    // The clamp keeps the value within 1..=20, so the cast is lossless.
    requested.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT) as usize
}

/// Reads an optional string-valued field, treating a blank or null value as absent
///
/// Non-blank values must still name a known variant of `T`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(raw.trim().to_string().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

/// Reads an optional requested limit without rejecting out-of-range integers
///
/// Integers that overflow `i64` saturate, so [`clamp_limit`] always gets to
/// correct them. Blank values are absent; fractions and non-numbers are errors.
pub fn saturating_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LimitVisitor)
}

struct LimitVisitor;

impl<'de> Visitor<'de> for LimitVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer limit")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(i64::try_from(value).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if value.fract() != 0.0 || value.is_nan() {
            return Err(E::invalid_value(de::Unexpected::Float(value), &self));
        }
        // float-to-int casts saturate
        Ok(Some(value as i64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        match value.parse::<i64>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(Some(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Some(i64::MIN)),
                _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
            },
        }
    }
}
