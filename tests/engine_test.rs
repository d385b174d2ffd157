use std::sync::Arc;
use chrono::{Duration, NaiveDate};
use stricto_lib::brain::strategy::{Category, CALCULATION_DRILL, EDITORIAL_READING};
use stricto_lib::brain::{GeneratedTask, PlanEngine, Priority, MAX_TASKS};
use stricto_lib::request::{ExamStage, ProficiencyLevel, RequestContext, UserType};
use stricto_lib::topics::{TopicRecord, TopicRepository};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn days_ago(n: i64) -> String {
    (today() - Duration::days(n)).format("%Y-%m-%d").to_string()
}

fn repository() -> TopicRepository {
    TopicRepository::from_records(vec![
        TopicRecord::new("Math", "Number System", "Basics", 1),
        TopicRecord::new("Math", "Algebra", "Mains Level Equations", 2),
        TopicRecord::new("Math", "Percentages", "Basics", 3),
        TopicRecord::new("Math", "Profit and Loss", "Discounts", 4),
        TopicRecord::new("Math", "Time and Work", "Pipes", 5),
        TopicRecord::new("English", "Grammar", "Nouns", 1),
        TopicRecord::new("English", "Reading Comprehension", "Inference", 2),
        TopicRecord::new("GA", "Static GK", "Dams", 2),
        TopicRecord::new("GA", "Current Affairs", "Daily News", 1),
        TopicRecord::new("Reasoning", "MAINS LEVEL Puzzles", "Floors", 1),
        TopicRecord::new("Reasoning", "Syllogism", "Basics", 2),
    ])
}

fn engine() -> PlanEngine {
    PlanEngine::new(Arc::new(repository()))
}

fn ctx(subject: &str, level: ProficiencyLevel, stage: ExamStage, days: i64, user: UserType) -> RequestContext {
    RequestContext::new(subject, level, stage, days, user)
}

fn labels(tasks: &[GeneratedTask]) -> Vec<&str> {
    tasks.iter().map(|t| t.label.as_str()).collect()
}

#[test]
fn test_mock_cap_for_every_level() {
    for level in [ProficiencyLevel::Weak, ProficiencyLevel::Average, ProficiencyLevel::Strong] {
        for (stage, days) in [(ExamStage::Prelims, 10), (ExamStage::Prelims, 45), (ExamStage::Mains, 10), (ExamStage::Mains, 90)] {
            for user in [UserType::Beginner, UserType::Repeater] {
                let request = ctx("Math", level, stage, days, user).with_syllabus(90);
                for task in engine().generate_on(&request, today()) {
                    if task.category == Category::Test && task.label.contains("Mock") {
                        assert!(task.duration_hours <= 1.0, "{} = {}", task.label, task.duration_hours);
                    }
                }
            }
        }
    }
}

#[test]
fn test_weak_mock_capped_and_other_work_scaled() {
    let request = ctx("Reasoning", ProficiencyLevel::Weak, ExamStage::Prelims, 10, UserType::Repeater);
    let tasks = engine().generate_on(&request, today());

    let mock = tasks.iter().find(|t| t.label == "Prelims Full Mock #1").unwrap();
    assert_eq!(mock.duration_hours, 1.0);
    assert_eq!(mock.duration_text, "1.0 Hrs");

    let analysis = tasks.iter().find(|t| t.label == "Error Analysis").unwrap();
    assert_eq!(analysis.duration_hours, 1.5);
    assert_eq!(analysis.duration_text, "1.5 Hrs");
}

#[test]
fn test_strong_and_average_scaling() {
    let strong = ctx("Reasoning", ProficiencyLevel::Strong, ExamStage::Mains, 90, UserType::Repeater);
    let tasks = engine().generate_on(&strong, today());
    let essay = tasks.iter().find(|t| t.label == "Essay Writing").unwrap();
    assert!((essay.duration_hours - 0.7).abs() < 1e-9);
    assert_eq!(essay.duration_text, "0.7 Hrs");

    let average = ctx("Reasoning", ProficiencyLevel::Average, ExamStage::Mains, 90, UserType::Repeater);
    let tasks = engine().generate_on(&average, today());
    let essay = tasks.iter().find(|t| t.label == "Essay Writing").unwrap();
    assert_eq!(essay.duration_hours, 1.0);
}

#[test]
fn test_ga_prelims_crunch_yields_nothing() {
    let request = ctx("GA", ProficiencyLevel::Weak, ExamStage::Prelims, 15, UserType::Repeater);
    assert!(engine().generate_on(&request, today()).is_empty());
}

#[test]
fn test_sequential_progression_skips_completed_ids() {
    let request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 45, UserType::Repeater)
        .with_topic_progress("Math", 3);
    let tasks = engine().generate_on(&request, today());

    let bound: Vec<_> = tasks.iter().filter_map(|t| t.topic_id).collect();
    assert!(!bound.is_empty());
    assert!(bound.iter().all(|id| *id > 3));
    assert_eq!(bound[0], 4);

    let revision = tasks.iter().find(|t| t.category == Category::Revision).unwrap();
    assert_eq!(revision.label, "Chapter-wise Revision: Profit and Loss - Discounts");
    assert_eq!(revision.topic.as_deref(), Some("Profit and Loss"));
    assert_eq!(revision.sub_topic.as_deref(), Some("Discounts"));
}

#[test]
fn test_binding_is_sequential_but_not_consuming() {
    let request = ctx("GA", ProficiencyLevel::Average, ExamStage::Mains, 45, UserType::Repeater);
    let tasks = engine().generate_on(&request, today());

    let bound: Vec<_> = tasks.iter().filter(|t| t.topic_id.is_some()).collect();
    assert_eq!(bound.len(), 3);
    // Lowest id first, repeated for every Learning/Revision entry.
    assert!(bound.iter().all(|t| t.topic_id == Some(1)));
    assert!(bound.iter().all(|t| t.topic.as_deref() == Some("Current Affairs")));

    let practice = tasks.iter().find(|t| t.category == Category::Practice).unwrap();
    assert!(practice.topic.is_none());
    assert_eq!(practice.label, "GA Static GK Practice Questions");
}

#[test]
fn test_progress_past_the_end_binds_nothing() {
    let request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 45, UserType::Repeater)
        .with_topic_progress("Math", 99);
    let tasks = engine().generate_on(&request, today());
    assert!(!tasks.is_empty());
    assert!(tasks.iter().all(|t| t.topic.is_none()));
    assert_eq!(tasks[1].label, "Chapter-wise Revision");
}

#[test]
fn test_beginner_mains_level_topics_filtered() {
    let request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 100, UserType::Beginner)
        .with_syllabus(30)
        .with_topic_progress("Math", 1);
    let tasks = engine().generate_on(&request, today());
    let foundation = tasks.iter().find(|t| t.category == Category::Learning).unwrap();
    assert_eq!(foundation.topic_id, Some(3));

    // Case-insensitive on the topic text as well.
    let reasoning = ctx("Reasoning", ProficiencyLevel::Average, ExamStage::Prelims, 100, UserType::Beginner)
        .with_syllabus(70);
    let tasks = engine().generate_on(&reasoning, today());
    assert_eq!(tasks[0].topic.as_deref(), Some("Syllogism"));
}

#[test]
fn test_repeater_keeps_mains_level_topics() {
    let request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 45, UserType::Repeater)
        .with_topic_progress("Math", 1);
    let tasks = engine().generate_on(&request, today());
    let revision = tasks.iter().find(|t| t.category == Category::Revision).unwrap();
    assert_eq!(revision.topic_id, Some(2));
}

#[test]
fn test_daily_habits_never_take_topics() {
    let english = ctx("English", ProficiencyLevel::Weak, ExamStage::Prelims, 100, UserType::Beginner);
    let tasks = engine().generate_on(&english, today());
    assert_eq!(tasks[0].label, EDITORIAL_READING);
    assert!(tasks[0].topic.is_none());
    assert!(tasks[0].daily_habit);
    assert_eq!(tasks[1].label, "Foundation Concept Building: Grammar - Nouns");

    let math = ctx("Math", ProficiencyLevel::Weak, ExamStage::Prelims, 100, UserType::Repeater);
    let tasks = engine().generate_on(&math, today());
    assert_eq!(tasks[0].label, CALCULATION_DRILL);
    assert!(tasks[0].topic.is_none());
}

#[test]
fn test_unknown_subject_has_no_topics() {
    let request = ctx("History", ProficiencyLevel::Average, ExamStage::Prelims, 45, UserType::Repeater);
    let tasks = engine().generate_on(&request, today());
    assert_eq!(tasks.len(), 4);
    assert!(tasks.iter().all(|t| t.topic.is_none()));
}

#[test]
fn test_priority_and_strategy_tag() {
    let urgent = ctx("Reasoning", ProficiencyLevel::Average, ExamStage::Prelims, 29, UserType::Repeater);
    let tasks = engine().generate_on(&urgent, today());
    assert!(tasks.iter().all(|t| t.priority == Priority::High));
    assert!(tasks.iter().all(|t| t.strategy_tag == "REPEATER | Prelims | 29D"));

    let relaxed = ctx("Reasoning", ProficiencyLevel::Average, ExamStage::Mains, 30, UserType::Beginner);
    let tasks = engine().generate_on(&relaxed, today());
    assert!(tasks.iter().all(|t| t.priority == Priority::Normal));
    assert!(tasks.iter().all(|t| t.strategy_tag == "BEGINNER | Mains | 30D"));
}

#[test]
fn test_reviews_are_prepended() {
    let request = ctx("Reasoning", ProficiencyLevel::Average, ExamStage::Mains, 90, UserType::Repeater)
        .with_topic_completed("Blood Relations", days_ago(3))
        .with_topic_completed("Coding", days_ago(10))
        .with_topic_completed("Direction Sense", days_ago(21))
        .with_topic_completed("Inequality", "not-a-date");
    let tasks = engine().generate_on(&request, today());

    assert_eq!(tasks.len(), 5);
    assert!(tasks[0].label.starts_with("3-Day Review: Blood Relations"));
    assert!(tasks[1].label.starts_with("21-Day Review: Direction Sense"));
    assert_eq!(tasks[0].category, Category::Revision);
    assert_eq!(tasks[1].duration_hours, 1.0);
    assert!(tasks[2].label.starts_with("Mains Topics Deep Dive"));
}

#[test]
fn test_low_completion_truncates() {
    let request = ctx("Math", ProficiencyLevel::Weak, ExamStage::Prelims, 10, UserType::Repeater)
        .with_completion_rate("Math", 0.4);
    let tasks = engine().generate_on(&request, today());
    // 6 entries, floor(6 * 0.7) = 4
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[0].label, CALCULATION_DRILL);
    assert!(tasks[1].label.starts_with("Rapid Fire Formulas"));
}

#[test]
fn test_high_or_steady_completion_never_grows() {
    for rate in [0.6, 0.95] {
        let request = ctx("Math", ProficiencyLevel::Weak, ExamStage::Prelims, 10, UserType::Repeater)
            .with_completion_rate("Math", rate);
        assert_eq!(engine().generate_on(&request, today()).len(), 6, "rate = {}", rate);
    }

    // Other subjects' history does not apply.
    let request = ctx("Math", ProficiencyLevel::Weak, ExamStage::Prelims, 10, UserType::Repeater)
        .with_completion_rate("English", 0.1);
    assert_eq!(engine().generate_on(&request, today()).len(), 6);
}

#[test]
fn test_ceiling_keeps_all_urgent_in_order() {
    let mut request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 10, UserType::Repeater);
    for i in 0..8 {
        request = request.with_topic_completed(format!("Topic {}", i), days_ago(3));
    }
    let tasks = engine().generate_on(&request, today());

    assert_eq!(tasks.len(), MAX_TASKS);
    assert!(tasks[..8].iter().all(|t| t.label.starts_with("3-Day Review")));
    assert_eq!(tasks[8].label, CALCULATION_DRILL);
    assert!(tasks[9].label.starts_with("Rapid Fire Formulas"));
}

#[test]
fn test_ceiling_keeps_earliest_reviews_in_caller_order() {
    let mut request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 10, UserType::Repeater);
    let names: Vec<String> = ('A'..='K').rev().map(|c| format!("Topic {}", c)).collect();
    for name in &names {
        request = request.with_topic_completed(name.clone(), days_ago(3));
    }
    let tasks = engine().generate_on(&request, today());

    assert_eq!(tasks.len(), MAX_TASKS);
    for (task, name) in tasks.iter().zip(&names) {
        assert!(task.label.starts_with(&format!("3-Day Review: {}", name)), "{}", task.label);
    }
    assert!(!labels(&tasks).iter().any(|l| l.contains("Topic A")));
}

#[test]
fn test_ceiling_puts_habits_first_when_not_urgent() {
    let mut request = ctx("English", ProficiencyLevel::Average, ExamStage::Prelims, 45, UserType::Repeater);
    for i in 0..8 {
        request = request.with_topic_completed(format!("Topic {}", i), days_ago(7));
    }
    let tasks = engine().generate_on(&request, today());

    assert_eq!(tasks.len(), MAX_TASKS);
    assert_eq!(tasks[0].label, EDITORIAL_READING);
    assert!(tasks[1..9].iter().all(|t| t.label.starts_with("7-Day Review")));
    assert!(tasks[9].label.starts_with("Chapter-wise Revision"));
    assert!(!labels(&tasks).iter().any(|l| l.contains("Full Mock")));
}

#[test]
fn test_never_more_than_ten_tasks() {
    let subjects = ["Math", "English", "Reasoning", "GA", "History"];
    let stages = [ExamStage::Prelims, ExamStage::Mains];
    let days = [-3, 0, 15, 25, 35, 50, 70, 130, 300];
    for subject in subjects {
        for stage in stages {
            for d in days {
                for user in [UserType::Beginner, UserType::Repeater] {
                    for syllabus in [10, 70, 95] {
                        let mut request = ctx(subject, ProficiencyLevel::Weak, stage, d, user)
                            .with_syllabus(syllabus)
                            .with_daily_hours(8);
                        for i in 0..12 {
                            request = request.with_topic_completed(format!("T{}", i), days_ago(21));
                        }
                        let tasks = engine().generate_on(&request, today());
                        assert!(tasks.len() <= MAX_TASKS, "{} {:?} {}", subject, stage, d);
                    }
                }
            }
        }
    }
}

#[test]
fn test_generate_is_idempotent() {
    let request = ctx("English", ProficiencyLevel::Strong, ExamStage::Mains, 25, UserType::Beginner)
        .with_syllabus(65)
        .with_topic_progress("English", 1)
        .with_completion_rate("English", 0.3)
        .with_topic_completed("Cloze Test", days_ago(7));
    let engine = engine();
    let first = engine.generate_on(&request, today());
    let second = engine.generate_on(&request, today());
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_tasks_serialize_with_dashboard_field_names() {
    let request = ctx("Math", ProficiencyLevel::Average, ExamStage::Prelims, 45, UserType::Repeater);
    let tasks = engine().generate_on(&request, today());
    let json = serde_json::to_value(&tasks[1]).unwrap();

    assert_eq!(json["type"], "Revision");
    assert_eq!(json["task"], "Chapter-wise Revision: Number System - Basics");
    assert_eq!(json["duration"], "1.0 Hrs");
    assert_eq!(json["priority"], "normal");
    assert_eq!(json["strategy"], "REPEATER | Prelims | 45D");
    assert_eq!(json["subTopic"], "Basics");
    assert!(json.get("impact").is_none());
}
