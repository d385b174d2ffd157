use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::error::PlannerError;
use crate::topics::record::{TopicRecord, TopicRepository};

/// File key → canonical subject name.
pub const SUBJECT_FILES: [(&str, &str); 4] = [
    ("math", "Math"),
    ("english", "English"),
    ("reasoning", "Reasoning"),
    ("ga", "GA"),
];

#[derive(Debug, Deserialize)]
struct TopicRow {
    id: i64,
    #[serde(default = "unknown_topic")]
    topic: String,
    #[serde(default, rename = "sub-topic", alias = "sub_topic", alias = "subTopic")]
    sub_topic: String,
}

fn unknown_topic() -> String {
    "Unknown".to_string()
}

pub fn topic_file_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("topics_{}.json", key))
}

/// Parse one subject's topic table.
pub fn parse_topic_table(subject: &str, json: &str) -> Result<Vec<TopicRecord>, PlannerError> {
    let rows: Vec<TopicRow> = serde_json::from_str(json)
        .map_err(|e| PlannerError::from(e).with_subject(subject))?;

    Ok(rows
        .into_iter()
        .map(|row| TopicRecord {
            subject: subject.to_string(),
            topic: row.topic,
            sub_topic: row.sub_topic,
            id: row.id,
        })
        .collect())
}

/// Load a single subject's table asynchronously.
pub async fn load_subject(dir: &Path, key: &str, subject: &str) -> Result<Vec<TopicRecord>, PlannerError> {
    let path = topic_file_path(dir, key);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PlannerError::new(
            format!("Failed to read topic file: {}", e),
            "io"
        ).with_subject(subject).with_context(format!("path: {:?}", path)))?;

    parse_topic_table(subject, &content)
        .map_err(|e| e.with_context(format!("path: {:?}", path)))
}

/// Load every known subject from `dir`.
/// Missing or broken files leave that subject empty; this never fails.
pub async fn load_repository(dir: &Path) -> TopicRepository {
    let mut repo = TopicRepository::new();

    for (key, subject) in SUBJECT_FILES {
        match load_subject(dir, key, subject).await {
            Ok(records) => {
                tracing::info!(subject = subject, count = records.len(), "Loaded topics");
                repo.insert_subject(subject, records);
            }
            Err(e) => {
                tracing::warn!(subject = subject, error = %e, "Topic table unavailable");
            }
        }
    }

    if repo.is_empty() {
        tracing::error!(dir = ?dir, "No syllabus found, plans will carry no topics");
    }

    repo
}
