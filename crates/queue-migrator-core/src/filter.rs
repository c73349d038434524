//! Eligibility rules deciding which received messages are moved.

use chrono::Duration;
use queue_migrator_runtime::{ReceivedMessage, Timestamp};

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

/// Outcome of checking one message against a [`MessageFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Young enough and matching the body filter
    Eligible { age: Duration },
    /// Age reached or exceeded the maximum
    TooOld { age: Duration },
    /// Body does not contain the filter text
    FilteredOut,
    /// Provider did not report when the message was sent
    UnknownAge,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }
}

/// Age and body-content policy for a run
#[derive(Debug, Clone)]
pub struct MessageFilter {
    /// Messages with `age >= max_age` are skipped
    pub max_age: Duration,
    /// Substring the body must contain; empty matches everything
    pub contains: String,
}

impl MessageFilter {
    pub fn new(max_age: Duration, contains: impl Into<String>) -> Self {
        Self {
            max_age,
            contains: contains.into(),
        }
    }

    /// Decide whether `message` should be moved.
    ///
    /// Age is measured against `run_time`. A message sent after `run_time`
    /// has a negative age and counts as young.
    pub fn evaluate(&self, message: &ReceivedMessage, run_time: Timestamp) -> Eligibility {
        let Some(sent_at) = message.sent_at else {
            return Eligibility::UnknownAge;
        };

        let age = sent_at.age_at(run_time);
        if age >= self.max_age {
            return Eligibility::TooOld { age };
        }

        if !message.body.contains(self.contains.as_str()) {
            return Eligibility::FilteredOut;
        }

        Eligibility::Eligible { age }
    }
}
