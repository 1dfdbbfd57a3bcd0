//! JSON rendering and parsing of breakpoint lists.
//!
//! The rendered form is a compact array of positional pairs in ascending position
//! order, e.g. `[[10,1],[20,2],[30,1],[40,0]]`. An empty store renders as `[]`.
//! Parsing accepts the same shape and only succeeds for canonical breakpoint lists.

use std::{fmt, str::FromStr};

use intensity_common::{Result, error::Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};

use crate::{
    breakpoint::Breakpoint,
    domain::{Intensity, Position},
    segments::IntensitySegments,
};

impl<P: Serialize, V: Serialize> Serialize for Breakpoint<P, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.position, &self.intensity).serialize(serializer)
    }
}

impl<'de, P, V> Deserialize<'de> for Breakpoint<P, V>
where
    P: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        <(P, V)>::deserialize(deserializer).map(Breakpoint::from)
    }
}

impl<P: Serialize, V: Serialize> Serialize for IntensitySegments<P, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.breakpoints())
    }
}

impl<'de, P, V> Deserialize<'de> for IntensitySegments<P, V>
where
    P: Position + Deserialize<'de>,
    V: Intensity + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let breakpoints = Vec::<Breakpoint<P, V>>::deserialize(deserializer)?;
        IntensitySegments::from_breakpoints(breakpoints).map_err(serde::de::Error::custom)
    }
}

impl<P: Serialize, V: Serialize> IntensitySegments<P, V> {
    /// Renders the breakpoints as compact JSON, e.g. `[[10,1],[30,0]]`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::serialization("intensity segments", e))
    }
}

/// Same text as [`IntensitySegments::to_json`].
impl<P: Serialize, V: Serialize> fmt::Display for IntensitySegments<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<P, V> FromStr for IntensitySegments<P, V>
where
    P: Position + DeserializeOwned,
    V: Intensity + DeserializeOwned,
{
    type Err = Error;

    /// Parses the rendered form back into a store.
    ///
    /// Malformed JSON yields a `Serialization` error; well-formed input that is not a
    /// canonical breakpoint list yields `InvalidFormat`.
    fn from_str(s: &str) -> Result<Self> {
        let breakpoints: Vec<Breakpoint<P, V>> =
            serde_json::from_str(s).map_err(|e| Error::serialization("intensity segments", e))?;
        IntensitySegments::from_breakpoints(breakpoints)
    }
}
