use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Coverage Query", inline)]
#[serde(default)]
/// Coverage query presentation.
pub struct QueryOptions {
    /// Place a point on the map under each listed event's satellite.
    #[schemars(title = "Annotate Events")]
    pub annotate_events: bool,
}
