use chrono::{DateTime, Utc};

/// Options controlling statement compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOptions {
    /// Reference time for `now()` in time dimension offsets. Captured once at the start of
    /// compilation when unset.
    pub now: Option<DateTime<Utc>>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub(crate) fn resolve_now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
