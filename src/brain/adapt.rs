use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easier,
    Normal,
    Harder,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Scale applied to the day's task count
    pub multiplier: f64,
    pub difficulty: Difficulty,
    pub rate: f64,
}

/// Under half done → lighter load; above 80% → heavier; otherwise unchanged.
pub fn adjustment_for(rate: f64) -> Adjustment {
    let (multiplier, difficulty) = if rate < 0.5 {
        (0.7, Difficulty::Easier)
    } else if rate > 0.8 {
        (1.2, Difficulty::Harder)
    } else {
        (1.0, Difficulty::Normal)
    };

    Adjustment { multiplier, difficulty, rate }
}

pub fn adjust(completion_rate_by_subject: &BTreeMap<String, f64>) -> BTreeMap<String, Adjustment> {
    completion_rate_by_subject
        .iter()
        .map(|(subject, rate)| {
            let adjustment = adjustment_for(*rate);
            tracing::debug!(
                subject = %subject,
                rate = *rate,
                multiplier = adjustment.multiplier,
                difficulty = ?adjustment.difficulty,
                "Performance adjustment"
            );
            (subject.clone(), adjustment)
        })
        .collect()
}
