use serde::{Deserialize, Serialize};
use crate::request::{ExamStage, ProficiencyLevel, RequestContext, UserType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Learning,
    Practice,
    Revision,
    Test,
}

/// Abstract, not-yet-personalized unit of study work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyEntry {
    pub category: Category,
    pub label: String,
    /// Nominal duration before any proficiency scaling; always > 0
    pub hours: f64,
    /// Fixed daily routine (editorial reading, calculation drill)
    pub daily_habit: bool,
    /// Full or sectional mock exam, subject to the one-hour cap
    pub mock_test: bool,
}

impl StrategyEntry {
    fn new(category: Category, label: &str, hours: f64) -> Self {
        debug_assert!(hours > 0.0, "strategy durations are strictly positive");
        StrategyEntry {
            category,
            label: label.to_string(),
            hours,
            daily_habit: false,
            mock_test: false,
        }
    }

    pub fn learning(label: &str, hours: f64) -> Self {
        Self::new(Category::Learning, label, hours)
    }

    pub fn practice(label: &str, hours: f64) -> Self {
        Self::new(Category::Practice, label, hours)
    }

    pub fn revision(label: &str, hours: f64) -> Self {
        Self::new(Category::Revision, label, hours)
    }

    pub fn mock(label: &str, hours: f64) -> Self {
        StrategyEntry {
            mock_test: true,
            ..Self::new(Category::Test, label, hours)
        }
    }

    pub fn habit(category: Category, label: &str, hours: f64) -> Self {
        StrategyEntry {
            daily_habit: true,
            ..Self::new(category, label, hours)
        }
    }

    /// Learning and Revision work gets a syllabus topic attached; habits never do.
    pub fn takes_topic(&self) -> bool {
        !self.daily_habit && matches!(self.category, Category::Learning | Category::Revision)
    }
}

pub const EDITORIAL_READING: &str = "Editorial Reading (The Hindu)";
pub const CALCULATION_DRILL: &str = "Speed Calculation Drill";

/// Editorial slot: 40 minutes on long study days, 30 otherwise.
fn editorial_hours(daily_hours: u32) -> f64 {
    if daily_hours >= 5 {
        0.67
    } else {
        0.5
    }
}

const CALCULATION_HOURS: f64 = 0.33;

fn general_awareness(stage: ExamStage, days_left: i64, user_type: UserType) -> Vec<StrategyEntry> {
    // Prelims crunch: GA is dropped in favour of the scored sections.
    if stage == ExamStage::Prelims && days_left < 20 {
        tracing::debug!(days_left = days_left, "GA skipped for Prelims crunch");
        return Vec::new();
    }

    let mut strategies = vec![StrategyEntry::learning("Static GK Chapter", 1.0)];

    if days_left <= 60 {
        strategies.push(StrategyEntry::learning("Daily Current Affairs (For Mains)", 1.0));
        strategies.push(StrategyEntry::revision("Weekly Current Affairs Revision (Weekend)", 0.5));
    }

    if user_type == UserType::Repeater {
        strategies.push(StrategyEntry::practice("GA Static GK Practice Questions", 1.0));
    }

    strategies
}

fn beginner_mock_ladder(stage: ExamStage, days_left: i64) -> Vec<StrategyEntry> {
    match stage {
        ExamStage::Prelims => {
            if days_left < 20 {
                vec![
                    StrategyEntry::mock("Prelims Full Mock #1", 2.0),
                    StrategyEntry::mock("Prelims Full Mock #2", 2.0),
                    StrategyEntry::mock("Prelims Full Mock #3", 2.0),
                ]
            } else if days_left < 40 {
                vec![StrategyEntry::mock("Prelims Full Mock (Daily)", 2.0)]
            } else if days_left < 120 {
                vec![StrategyEntry::mock("Prelims Full Mock (3-4 per week)", 1.5)]
            } else {
                vec![StrategyEntry::mock("Prelims Full Mock (1-2 per week)", 1.0)]
            }
        }
        ExamStage::Mains => {
            if days_left < 20 {
                vec![
                    StrategyEntry::mock("Mains Full Mock #1", 2.5),
                    StrategyEntry::mock("Mains Full Mock #2", 2.5),
                ]
            } else if days_left < 40 {
                vec![StrategyEntry::mock("Mains Full Mock (Daily)", 2.5)]
            } else {
                vec![StrategyEntry::mock("Mains Full Mock (2-3 per week)", 2.0)]
            }
        }
    }
}

fn beginner(stage: ExamStage, days_left: i64, syllabus_percent: u32) -> Vec<StrategyEntry> {
    if syllabus_percent < 60 {
        // Foundation phase
        vec![
            StrategyEntry::learning("Foundation Concept Building", 1.5),
            StrategyEntry::practice("Basic Practice Questions", 1.0),
        ]
    } else if syllabus_percent < 80 {
        // Past the halfway mark, so sectional mocks are always on here.
        vec![
            StrategyEntry::learning("Advanced Concept Revision", 1.0),
            StrategyEntry::practice("Moderate Practice (50 Questions)", 1.5),
            StrategyEntry::mock("Sectional Mock (Subject-wise)", 1.0),
        ]
    } else {
        let mut strategies = vec![StrategyEntry::practice("Previous Year Questions", 1.0)];
        strategies.extend(beginner_mock_ladder(stage, days_left));
        strategies
    }
}

fn repeater(stage: ExamStage, days_left: i64) -> Vec<StrategyEntry> {
    match stage {
        ExamStage::Prelims => {
            if days_left < 30 {
                vec![
                    StrategyEntry::revision("Rapid Fire Formulas", 1.0),
                    StrategyEntry::mock("Prelims Full Mock #1", 2.0),
                    StrategyEntry::mock("Prelims Full Mock #2", 2.0),
                    StrategyEntry::mock("Prelims Full Mock #3 (Optional)", 1.5),
                    StrategyEntry::practice("Error Analysis", 1.0),
                ]
            } else if days_left < 60 {
                vec![
                    StrategyEntry::revision("Chapter-wise Revision", 1.0),
                    StrategyEntry::practice("High-Difficulty Questions", 1.5),
                    StrategyEntry::mock("Prelims Full Mock (Daily)", 2.0),
                    StrategyEntry::mock("Mains Full Mock", 2.5),
                ]
            } else if days_left < 120 {
                vec![
                    StrategyEntry::revision("Topic-wise Revision", 1.0),
                    StrategyEntry::practice("Previous Year Questions", 1.5),
                    StrategyEntry::mock("Prelims Full Mock (2 per week)", 1.0),
                    StrategyEntry::mock("Mains Full Mock (1 per week)", 1.0),
                ]
            } else {
                vec![
                    StrategyEntry::revision("Concept Revision", 1.5),
                    StrategyEntry::practice("Advanced Practice", 1.5),
                    StrategyEntry::mock("Prelims Full Mock (2 per week)", 1.0),
                    StrategyEntry::mock("Mains Full Mock (1 per week)", 1.0),
                ]
            }
        }
        ExamStage::Mains => {
            if days_left < 30 {
                vec![
                    StrategyEntry::revision("Mains Topics Rapid Revision", 1.5),
                    StrategyEntry::mock("Mains Full Mock #1", 2.5),
                    StrategyEntry::mock("Mains Full Mock #2", 2.5),
                    StrategyEntry::practice("Answer Writing Practice", 1.5),
                ]
            } else if days_left < 60 {
                vec![
                    StrategyEntry::revision("Mains Syllabus Revision", 1.5),
                    StrategyEntry::mock("Mains Full Mock (Daily)", 2.5),
                    StrategyEntry::practice("Descriptive Practice", 1.5),
                ]
            } else {
                vec![
                    StrategyEntry::revision("Mains Topics Deep Dive", 2.0),
                    StrategyEntry::mock("Mains Full Mock (2-3 per week)", 2.0),
                    StrategyEntry::practice("Essay Writing", 1.0),
                ]
            }
        }
    }
}

/// Map a candidate's situation to the day's abstract strategy entries.
///
/// Daily habits come first, then GA short-circuits, then the beginner or
/// repeater table. Only GA during the Prelims crunch yields an empty list.
pub fn plan(
    subject: &str,
    _level: ProficiencyLevel,
    stage: ExamStage,
    days_left: i64,
    syllabus_percent: u32,
    user_type: UserType,
    daily_hours: u32,
) -> Vec<StrategyEntry> {
    let mut strategies = Vec::new();

    match subject {
        "English" => strategies.push(StrategyEntry::habit(
            Category::Learning,
            EDITORIAL_READING,
            editorial_hours(daily_hours),
        )),
        "Math" => strategies.push(StrategyEntry::habit(
            Category::Practice,
            CALCULATION_DRILL,
            CALCULATION_HOURS,
        )),
        "GA" => return general_awareness(stage, days_left, user_type),
        _ => {}
    }

    match user_type {
        UserType::Beginner => strategies.extend(beginner(stage, days_left, syllabus_percent)),
        UserType::Repeater => strategies.extend(repeater(stage, days_left)),
    }

    strategies
}

/// `plan` over an already-built request context.
pub fn plan_for(ctx: &RequestContext) -> Vec<StrategyEntry> {
    plan(
        &ctx.subject,
        ctx.level,
        ctx.exam_stage,
        ctx.days_left,
        ctx.syllabus_percent,
        ctx.user_type,
        ctx.daily_hours,
    )
}
