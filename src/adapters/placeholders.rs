use crate::domain::ports::Placeholders;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Thread-local randomness and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlaceholders;

impl Placeholders for RandomPlaceholders {
    fn dummy_suffix(&self) -> u32 {
        rand::rng().random_range(1_000_000..=9_999_999)
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
