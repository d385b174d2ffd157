use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One syllabus entry. Identity is `(subject, id)`; ids order the
/// sequential progression through a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub subject: String,
    pub topic: String,
    pub sub_topic: String,
    pub id: i64,
}

impl TopicRecord {
    pub fn new<S: Into<String>>(subject: S, topic: S, sub_topic: S, id: i64) -> Self {
        TopicRecord {
            subject: subject.into(),
            topic: topic.into(),
            sub_topic: sub_topic.into(),
            id,
        }
    }

    /// True when either the topic or sub-topic text marks Mains-only material.
    pub fn is_mains_level(&self) -> bool {
        const MARKER: &str = "mains level";
        self.topic.to_lowercase().contains(MARKER) || self.sub_topic.to_lowercase().contains(MARKER)
    }
}

/// Read-only topic table, per subject, each list ascending by id.
#[derive(Debug, Clone, Default)]
pub struct TopicRepository {
    by_subject: HashMap<String, Vec<TopicRecord>>,
}

impl TopicRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TopicRecord>,
    {
        let mut repo = Self::new();
        for record in records {
            repo.by_subject
                .entry(record.subject.clone())
                .or_default()
                .push(record);
        }
        for list in repo.by_subject.values_mut() {
            list.sort_by_key(|r| r.id);
        }
        repo
    }

    /// Replace one subject's table wholesale.
    pub fn insert_subject(&mut self, subject: &str, mut records: Vec<TopicRecord>) {
        records.sort_by_key(|r| r.id);
        self.by_subject.insert(subject.to_string(), records);
    }

    /// Topics for `subject` in ascending id order; empty for unknown subjects.
    pub fn topics_for(&self, subject: &str) -> &[TopicRecord] {
        self.by_subject
            .get(subject)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.by_subject.keys().cloned().collect();
        subjects.sort();
        subjects
    }

    pub fn len(&self) -> usize {
        self.by_subject.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
