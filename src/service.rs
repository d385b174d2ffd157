use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::brain::{format_hours, strategy::Category, GeneratedTask, Priority};
use crate::request::{ExamStage, PlanRequest};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub tasks: Vec<GeneratedTask>,
    pub note: String,
    pub days_left: i64,
    /// Resolved target date, `YYYY-MM-DD`
    pub exam_date: NaiveDate,
}

/// Placeholder when GA is deliberately dropped before Prelims.
pub fn skip_task() -> GeneratedTask {
    GeneratedTask {
        subject: "GA".to_string(),
        category: Category::Revision,
        label: "Skipped per Strategy (Prelims/Urgent)".to_string(),
        duration_text: "0 Min".to_string(),
        duration_hours: 0.0,
        priority: Priority::Normal,
        strategy_tag: "SKIP".to_string(),
        topic: Some("Focus on Core Subjects".to_string()),
        sub_topic: None,
        topic_id: None,
        impact: Some("Strategy".to_string()),
        daily_habit: false,
    }
}

/// Generic one-hour notes review for any other empty plan.
pub fn fallback_task(subject: &str) -> GeneratedTask {
    GeneratedTask {
        subject: subject.to_string(),
        category: Category::Revision,
        label: format!("Review {} Notes", subject),
        duration_text: format_hours(1.0),
        duration_hours: 1.0,
        priority: Priority::Normal,
        strategy_tag: "Fallback".to_string(),
        topic: Some("General Revision".to_string()),
        sub_topic: None,
        topic_id: None,
        impact: Some("Fallback".to_string()),
        daily_habit: false,
    }
}

/// Serve one daily-plan request: derive the context, run the engine and
/// substitute a fallback task when the engine has nothing to offer.
pub fn daily_plan(state: &AppState, request: PlanRequest, today: NaiveDate) -> PlanResponse {
    let (ctx, system_note) = request.into_context(today, &state.config);
    let engine = state.engine();
    let tasks = engine.generate_on(&ctx, today);
    let exam_date = today + Duration::days(ctx.days_left);

    tracing::info!(subject = %ctx.subject, count = tasks.len(), "Generated tasks");
    state.metrics.record_plan(tasks.len());

    if tasks.is_empty() {
        state.metrics.record_fallback();

        if ctx.subject == "GA" && ctx.exam_stage == ExamStage::Prelims {
            tracing::info!(days_left = ctx.days_left, "GA skipped for Prelims");
            return PlanResponse {
                tasks: vec![skip_task()],
                note: "AI Plan: GA skipped to prioritize Math/Eng/Reas for Prelims.".to_string(),
                days_left: ctx.days_left,
                exam_date,
            };
        }

        tracing::info!(subject = %ctx.subject, "Fallback triggered");
        return PlanResponse {
            tasks: vec![fallback_task(&ctx.subject)],
            note: format!("AI Plan ({} days left): {}", ctx.days_left, system_note),
            days_left: ctx.days_left,
            exam_date,
        };
    }

    PlanResponse {
        tasks,
        note: format!("AI Plan ({} days left): {}", ctx.days_left, system_note),
        days_left: ctx.days_left,
        exam_date,
    }
}
