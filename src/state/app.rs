use std::sync::Arc;
use parking_lot::RwLock;
use crate::brain::PlanEngine;
use crate::config::PlannerConfig;
use crate::metrics::Metrics;
use crate::topics::TopicRepository;

/// Process-wide state container, passed explicitly to request handlers.
/// The topic table is an immutable snapshot; reloading swaps the whole `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Current topic table snapshot
    pub topics: Arc<RwLock<Arc<TopicRepository>>>,
    pub metrics: Metrics,
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    pub fn new(topics: TopicRepository, config: PlannerConfig) -> Self {
        AppState {
            topics: Arc::new(RwLock::new(Arc::new(topics))),
            metrics: Metrics::new(),
            config: Arc::new(config),
        }
    }

    /// Snapshot used for the lifetime of one request.
    pub fn topics_snapshot(&self) -> Arc<TopicRepository> {
        self.topics.read().clone()
    }

    /// Install a freshly loaded topic table. In-flight requests keep their snapshot.
    pub fn replace_topics(&self, topics: TopicRepository) {
        let count = topics.len();
        *self.topics.write() = Arc::new(topics);
        tracing::info!(topics = count, "Topic table replaced");
    }

    /// Engine bound to the current snapshot.
    pub fn engine(&self) -> PlanEngine {
        PlanEngine::new(self.topics_snapshot())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TopicRepository::new(), PlannerConfig::default())
    }
}
