use routesmith::schedule::{FrequencySpec, StopTimeBaseline};
use serde::Deserialize;

/// Baseline times are `HH:MM` strings.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableRequest {
    pub baseline: Vec<StopTimeBaseline>,
    pub frequency: FrequencySpec,
}
