pub mod adapt;
pub mod review;
pub mod strategy;

use std::sync::Arc;
use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use crate::request::RequestContext;
use crate::topics::{TopicRecord, TopicRepository};
use strategy::{Category, StrategyEntry};

/// Hard ceiling on tasks in one day's plan.
pub const MAX_TASKS: usize = 10;

/// No mock may run longer than this, whatever the proficiency scaling.
pub const MOCK_CAP_HOURS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
}

/// One personalized task in a day's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTask {
    pub subject: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "task")]
    pub label: String,
    #[serde(rename = "duration")]
    pub duration_text: String,
    pub duration_hours: f64,
    pub priority: Priority,
    #[serde(rename = "strategy")]
    pub strategy_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
    /// Set only on caller-side fallback tasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip)]
    pub daily_habit: bool,
}

impl GeneratedTask {
    /// Kept through the ceiling reduction regardless of position.
    pub fn is_protected(&self) -> bool {
        self.priority == Priority::High || self.daily_habit
    }
}

/// `1.0 Hrs`, `0.75 Hrs`, `1.01 Hrs`: two decimals at most, one at least.
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 100.0).round() / 100.0;
    let mut text = format!("{:.2}", rounded);
    if text.ends_with('0') {
        text.pop();
    }
    format!("{} Hrs", text)
}

/// Assembles day plans from the rule tables against an injected topic table.
///
/// Cloning is cheap; the topic table is shared read-only.
#[derive(Debug, Clone)]
pub struct PlanEngine {
    topics: Arc<TopicRepository>,
}

impl PlanEngine {
    pub fn new(topics: Arc<TopicRepository>) -> Self {
        PlanEngine { topics }
    }

    pub fn topics(&self) -> &TopicRepository {
        &self.topics
    }

    /// Plan for the current local date.
    pub fn generate(&self, ctx: &RequestContext) -> Vec<GeneratedTask> {
        self.generate_on(ctx, chrono::Local::now().date_naive())
    }

    /// Plan as of `today`. Same context and date always give the same plan.
    pub fn generate_on(&self, ctx: &RequestContext, today: NaiveDate) -> Vec<GeneratedTask> {
        let subject = ctx.subject.as_str();

        let mut strategies = strategy::plan_for(ctx);
        if strategies.is_empty() {
            tracing::info!(subject = subject, stage = ctx.exam_stage.as_str(), "No strategy for request");
            return Vec::new();
        }

        if !ctx.topic_completion_history.is_empty() {
            let mut reviews = review::review_tasks(&ctx.topic_completion_history, subject, today);
            if !reviews.is_empty() {
                // Reviews take precedence over new material.
                tracing::info!(subject = subject, count = reviews.len(), "Prepending spaced-repetition reviews");
                reviews.append(&mut strategies);
                strategies = reviews;
            }
        }

        let performance_multiplier = ctx
            .completion_history
            .get(subject)
            .map(|rate| adapt::adjustment_for(*rate).multiplier);
        if let Some(multiplier) = performance_multiplier {
            tracing::info!(subject = subject, multiplier = multiplier, "Applying performance adjustment");
        }

        let candidates = self.candidate_topics(ctx);
        let mut tasks = bind_tasks(ctx, &strategies, candidates.first().copied());

        if let Some(multiplier) = performance_multiplier {
            apply_performance(&mut tasks, multiplier);
        }

        enforce_ceiling(&mut tasks);
        tasks
    }

    /// Topic pool for the request's subject, in id order.
    fn candidate_topics(&self, ctx: &RequestContext) -> Vec<&TopicRecord> {
        let subject = ctx.subject.as_str();
        let mut pool: Vec<&TopicRecord> = self.topics.topics_for(subject).iter().collect();

        if ctx.user_type == crate::request::UserType::Beginner && ctx.syllabus_percent < 80 {
            pool.retain(|t| !t.is_mains_level());
            tracing::debug!(
                subject = subject,
                syllabus = ctx.syllabus_percent,
                remaining = pool.len(),
                "Removed Mains-level topics for beginner"
            );
        }

        if let Some(last_id) = ctx.topic_progress.get(subject) {
            pool.retain(|t| t.id > *last_id);
            tracing::debug!(subject = subject, after_id = *last_id, remaining = pool.len(), "Filtered by progress");
        }

        pool
    }
}

/// Turn strategy entries into tasks: scale, cap mocks, attach the next topic.
fn bind_tasks(
    ctx: &RequestContext,
    strategies: &[StrategyEntry],
    next_topic: Option<&TopicRecord>,
) -> Vec<GeneratedTask> {
    let time_multiplier = ctx.level.time_multiplier();
    tracing::debug!(subject = %ctx.subject, level = ?ctx.level, multiplier = time_multiplier, "Time allocation");

    let priority = if ctx.days_left < 30 { Priority::High } else { Priority::Normal };
    let strategy_tag = ctx.strategy_tag();

    strategies
        .iter()
        .map(|entry| {
            let mut hours = entry.hours * time_multiplier;
            if entry.mock_test {
                hours = hours.min(MOCK_CAP_HOURS);
            }

            let mut task = GeneratedTask {
                subject: ctx.subject.clone(),
                category: entry.category,
                label: entry.label.clone(),
                duration_text: format_hours(hours),
                duration_hours: hours,
                priority,
                strategy_tag: strategy_tag.clone(),
                topic: None,
                sub_topic: None,
                topic_id: None,
                impact: None,
                daily_habit: entry.daily_habit,
            };

            // Sequential, not consumed: every eligible entry gets the same next topic.
            if let Some(record) = next_topic.filter(|_| entry.takes_topic()) {
                task.label = format!("{}: {} - {}", entry.label, record.topic, record.sub_topic);
                task.topic = Some(record.topic.clone());
                task.sub_topic = Some(record.sub_topic.clone());
                task.topic_id = Some(record.id);
            }

            task
        })
        .collect()
}

/// Shrink the list for a low completion rate. Never grows it.
pub(crate) fn apply_performance(tasks: &mut Vec<GeneratedTask>, multiplier: f64) {
    if multiplier == 1.0 {
        return;
    }

    let target = (tasks.len() as f64 * multiplier).floor() as usize;
    if target < tasks.len() {
        tracing::info!(from = tasks.len(), to = target, "Reduced tasks for performance");
        tasks.truncate(target);
    }
}

/// Keep at most `MAX_TASKS`: protected tasks first, then optional ones in order.
pub(crate) fn enforce_ceiling(tasks: &mut Vec<GeneratedTask>) {
    if tasks.len() <= MAX_TASKS {
        return;
    }

    let generated = tasks.len();
    let (mut protected, optional): (Vec<GeneratedTask>, Vec<GeneratedTask>) =
        std::mem::take(tasks).into_iter().partition(|t| t.is_protected());

    let protected_count = protected.len();
    if protected_count >= MAX_TASKS {
        protected.truncate(MAX_TASKS);
        *tasks = protected;
    } else {
        let slots = MAX_TASKS - protected_count;
        protected.extend(optional.into_iter().take(slots));
        *tasks = protected;
    }

    tracing::warn!(
        generated = generated,
        kept = tasks.len(),
        protected = protected_count,
        "Task limit enforced"
    );
}
