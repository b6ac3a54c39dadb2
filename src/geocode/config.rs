use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Cap on simultaneous lookups. `None` issues every lookup at once.
    pub max_in_flight: Option<usize>,
    /// Deadline for a whole batch, counted from the start of the call. `None` waits as long
    /// as the resolver takes.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
