use serde::Deserialize;

use crate::geo::Geodetic;

/// One satellite's trajectory over the simulated window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectoryRecord {
    /// Satellite name, unique within a dataset.
    pub name: String,
    /// Time-ordered sub-satellite positions.
    pub positions: Vec<Geodetic>,
    /// Left ground-swath edge, if supplied.
    pub left_swath: Option<Vec<Geodetic>>,
    /// Right ground-swath edge, if supplied.
    pub right_swath: Option<Vec<Geodetic>>,
    /// Why the backend's entry could not be decoded. Such a record is
    /// kept so indices stay aligned, and is built as a placeholder.
    pub decode_error: Option<String>,
}

impl TrajectoryRecord {
    /// Record without swaths.
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<Geodetic>) -> Self {
        Self {
            name: name.into(),
            positions,
            left_swath: None,
            right_swath: None,
            decode_error: None,
        }
    }

    /// Placeholder for an entry that did not decode.
    #[must_use]
    pub fn malformed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            decode_error: Some(message.into()),
            ..Self::new(name, Vec::new())
        }
    }

    /// Left swath, if present and non-empty.
    #[must_use]
    pub fn left(&self) -> Option<&[Geodetic]> {
        self.left_swath.as_deref().filter(|s| !s.is_empty())
    }

    /// Right swath, if present and non-empty.
    #[must_use]
    pub fn right(&self) -> Option<&[Geodetic]> {
        self.right_swath.as_deref().filter(|s| !s.is_empty())
    }
}

/// One record as the backend sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    positions: Option<Vec<f64>>,
    #[serde(default)]
    left_swath: Option<Vec<f64>>,
    #[serde(default)]
    right_swath: Option<Vec<f64>>,
}

/// Body of the trajectory endpoint: a list of records or an error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum WirePayload {
    Records(Vec<serde_json::Value>),
    Error { error: String },
}

impl WireRecord {
    /// Decode entry `index` of a record list. An entry that does not match
    /// the record shape becomes a [`TrajectoryRecord::malformed`] carrying
    /// whatever name it had.
    pub(super) fn decode(index: usize, value: serde_json::Value) -> TrajectoryRecord {
        let name = value
            .get("name")
            .and_then(serde_json::Value::as_str)
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("satellite-{index}"), str::to_owned);
        match Self::deserialize(value) {
            Ok(wire) => wire.into_record(index),
            Err(e) => {
                log::warn!("record {index} ({name}) is malformed: {e}");
                TrajectoryRecord::malformed(name, format!("malformed record: {e}"))
            }
        }
    }

    /// Convert flat coordinate arrays into points, dropping any trailing
    /// values that do not form a whole triple.
    pub(super) fn into_record(self, index: usize) -> TrajectoryRecord {
        let name = if self.name.is_empty() {
            format!("satellite-{index}")
        } else {
            self.name
        };
        let positions = triples(&name, "positions", self.positions.as_deref())
            .unwrap_or_default();
        let left_swath = triples(&name, "leftSwath", self.left_swath.as_deref());
        let right_swath =
            triples(&name, "rightSwath", self.right_swath.as_deref());
        TrajectoryRecord {
            name,
            positions,
            left_swath,
            right_swath,
            decode_error: None,
        }
    }
}

fn triples(name: &str, field: &str, values: Option<&[f64]>) -> Option<Vec<Geodetic>> {
    let (points, remainder) = Geodetic::from_flat(values?);
    if remainder != 0 {
        log::warn!(
            "{name}: {field} has {remainder} trailing value(s) outside a \
             complete (lon, lat, alt) triple; ignored"
        );
    }
    Some(points)
}
