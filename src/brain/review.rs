use chrono::NaiveDate;
use indexmap::IndexMap;
use crate::brain::strategy::StrategyEntry;

/// Day offsets after first completion at which a topic comes back, with the
/// review length in hours.
pub const REVIEW_SCHEDULE: [(i64, f64); 3] = [(3, 0.5), (7, 0.75), (21, 1.0)];

pub const COMPLETION_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum ReviewDateError {
    #[error("invalid completion date for '{topic}': '{value}'")]
    Malformed {
        topic: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub fn parse_completion_date(topic: &str, value: &str) -> Result<NaiveDate, ReviewDateError> {
    NaiveDate::parse_from_str(value.trim(), COMPLETION_DATE_FORMAT).map_err(|source| {
        ReviewDateError::Malformed {
            topic: topic.to_string(),
            value: value.to_string(),
            source,
        }
    })
}

/// Review entry due for a topic completed `days_since` days ago, if any.
pub fn review_for(topic: &str, days_since: i64) -> Option<StrategyEntry> {
    REVIEW_SCHEDULE
        .iter()
        .find(|(offset, _)| *offset == days_since)
        .map(|(offset, hours)| {
            StrategyEntry::revision(&format!("{}-Day Review: {}", offset, topic), *hours)
        })
}

/// 3/7/21 spaced-repetition reviews due `today`.
///
/// Only exact day matches produce an entry, in the history's own order.
/// Malformed dates are logged and skipped without stopping the scan.
pub fn review_tasks(
    topic_completion_history: &IndexMap<String, String>,
    subject: &str,
    today: NaiveDate,
) -> Vec<StrategyEntry> {
    let mut reviews = Vec::new();

    for (topic, raw_date) in topic_completion_history {
        let completed = match parse_completion_date(topic, raw_date) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(subject = subject, error = %e, "Skipping review");
                continue;
            }
        };

        let days_since = (today - completed).num_days();
        if let Some(entry) = review_for(topic, days_since) {
            tracing::debug!(subject = subject, topic = %topic, days_since = days_since, "Review due");
            reviews.push(entry);
        }
    }

    reviews
}
