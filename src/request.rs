use std::collections::BTreeMap;
use chrono::{Datelike, Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use crate::config::PlannerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    Weak,
    Average,
    Strong,
}

impl ProficiencyLevel {
    /// Unknown levels are treated as average.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "weak" => ProficiencyLevel::Weak,
            "strong" => ProficiencyLevel::Strong,
            _ => ProficiencyLevel::Average,
        }
    }

    /// Scale applied to every nominal duration.
    pub fn time_multiplier(self) -> f64 {
        match self {
            ProficiencyLevel::Weak => 1.5,
            ProficiencyLevel::Average => 1.0,
            ProficiencyLevel::Strong => 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamStage {
    Prelims,
    Mains,
}

impl ExamStage {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("mains") {
            ExamStage::Mains
        } else {
            ExamStage::Prelims
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExamStage::Prelims => "Prelims",
            ExamStage::Mains => "Mains",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// First attempt at the exam
    Beginner,
    /// Has sat the exam before
    Repeater,
}

impl UserType {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("beginner") {
            UserType::Beginner
        } else {
            UserType::Repeater
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            UserType::Beginner => "BEGINNER",
            UserType::Repeater => "REPEATER",
        }
    }
}

/// Fully parsed inputs for one planning call. Immutable for the call's duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub subject: String,
    pub level: ProficiencyLevel,
    pub exam_stage: ExamStage,
    /// Days until the exam; negative once the date has passed
    pub days_left: i64,
    pub syllabus_percent: u32,
    pub user_type: UserType,
    pub daily_hours: u32,
    /// subject → id of the last completed topic
    pub topic_progress: BTreeMap<String, i64>,
    /// subject → completion rate in [0, 1]
    pub completion_history: BTreeMap<String, f64>,
    /// topic label → completion date (`YYYY-MM-DD`), in the caller's order
    pub topic_completion_history: IndexMap<String, String>,
}

impl RequestContext {
    pub fn new<S: Into<String>>(
        subject: S,
        level: ProficiencyLevel,
        exam_stage: ExamStage,
        days_left: i64,
        user_type: UserType,
    ) -> Self {
        RequestContext {
            subject: subject.into(),
            level,
            exam_stage,
            days_left,
            syllabus_percent: 0,
            user_type,
            daily_hours: 6,
            topic_progress: BTreeMap::new(),
            completion_history: BTreeMap::new(),
            topic_completion_history: IndexMap::new(),
        }
    }

    pub fn with_syllabus(mut self, percent: u32) -> Self {
        self.syllabus_percent = percent;
        self
    }

    pub fn with_daily_hours(mut self, hours: u32) -> Self {
        self.daily_hours = hours;
        self
    }

    pub fn with_topic_progress<S: Into<String>>(mut self, subject: S, last_id: i64) -> Self {
        self.topic_progress.insert(subject.into(), last_id);
        self
    }

    pub fn with_completion_rate<S: Into<String>>(mut self, subject: S, rate: f64) -> Self {
        self.completion_history.insert(subject.into(), rate);
        self
    }

    pub fn with_topic_completed<S: Into<String>, D: Into<String>>(mut self, topic: S, date: D) -> Self {
        self.topic_completion_history.insert(topic.into(), date.into());
        self
    }

    /// `BEGINNER | Prelims | 45D`
    pub fn strategy_tag(&self) -> String {
        format!("{} | {} | {}D", self.user_type.tag(), self.exam_stage.as_str(), self.days_left)
    }
}

/// Raw request as sent by the dashboard, before any defaulting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanRequest {
    pub subject: String,
    pub level: String,
    pub exam_stage: String,
    pub exam_date: Option<String>,
    pub user_type: String,
    #[serde(deserialize_with = "deserialize_lenient_u32")]
    pub syllabus_completed: u32,
    #[serde(deserialize_with = "deserialize_lenient_hours")]
    pub daily_hours: Option<u32>,
    pub topic_progress: BTreeMap<String, i64>,
    pub completion_history: BTreeMap<String, f64>,
    pub topic_completion_history: IndexMap<String, String>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        PlanRequest {
            subject: "English".to_string(),
            level: "weak".to_string(),
            exam_stage: "Prelims".to_string(),
            exam_date: None,
            user_type: "repeater".to_string(),
            syllabus_completed: 0,
            daily_hours: None,
            topic_progress: BTreeMap::new(),
            completion_history: BTreeMap::new(),
            topic_completion_history: IndexMap::new(),
        }
    }
}

fn deserialize_lenient_hours<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient_u32(deserializer).map(Some)
}

// Dashboards send numeric fields as numbers or as strings.
fn deserialize_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct LenientU32;

    impl<'de> Visitor<'de> for LenientU32 {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("{} is out of range", value)))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
            if value < 0 {
                return Ok(0);
            }
            u32::try_from(value).map_err(|_| E::custom(format!("{} is out of range", value)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u32, E> {
            if value.is_nan() || value > u32::MAX as f64 {
                return Err(E::custom(format!("{} is out of range", value)));
            }
            // Negative counts mean "nothing yet".
            Ok(value.max(0.0).trunc() as u32)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u32, E> {
            let trimmed = value.trim();
            if let Ok(n) = trimmed.parse::<u32>() {
                return Ok(n);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| E::custom(format!("'{}' is not a number", value)))
                .and_then(|f| self.visit_f64(f))
        }
    }

    deserializer.deserialize_any(LenientU32)
}

/// `ga` in any case becomes `GA`; everything else is title-cased.
pub fn normalize_subject(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("ga") {
        return "GA".to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut at_word_start = true;
    for ch in trimmed.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Resolve the exam date the way the dashboard expects and describe the choice.
pub fn resolve_exam_date(raw: Option<&str>, today: NaiveDate, config: &PlannerConfig) -> (NaiveDate, String) {
    let fallback = || today + Duration::days(config.fallback_exam_days);

    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() || raw.eq_ignore_ascii_case("other") {
        let mut year = today.year();
        if today.month() > config.season_month {
            year += 1;
        }
        return match NaiveDate::from_ymd_opt(year, config.season_month, config.season_day) {
            Some(date) => (date, format!("Auto-Target: Banking Season ({})", date.format("%B %Y"))),
            None => {
                tracing::warn!(
                    month = config.season_month,
                    day = config.season_day,
                    "Configured exam season is not a valid date"
                );
                (fallback(), "Invalid Date. Defaulting to 5 Months.".to_string())
            }
        };
    }

    for format in ["%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return (date, format!("Target: {}", raw));
        }
    }

    tracing::debug!(exam_date = raw, "Unparseable exam date, using fallback horizon");
    (fallback(), "Invalid Date. Defaulting to 5 Months.".to_string())
}

impl PlanRequest {
    /// Turn the raw request into a planning context plus the user-facing note.
    pub fn into_context(self, today: NaiveDate, config: &PlannerConfig) -> (RequestContext, String) {
        let (exam_date, mut note) = resolve_exam_date(self.exam_date.as_deref(), today, config);
        let days_left = (exam_date - today).num_days();

        let exam_stage = ExamStage::parse(&self.exam_stage);
        let user_type = UserType::parse(&self.user_type);

        if user_type == UserType::Beginner && days_left > 140 {
            note.push_str(" | Est. Syllabus Completion: 5 Months (Steady Pace)");
        } else if user_type == UserType::Beginner && days_left < 90 {
            note.push_str(" | Warning: Short Timeline for Beginner!");
        }
        if days_left < 20 && exam_stage == ExamStage::Prelims {
            note = "CRITICAL MODE: Exam in < 20 days. New topics stopped. Revision & Mocks Only.".to_string();
        }

        let daily_hours = self.daily_hours.unwrap_or(config.default_daily_hours);

        let ctx = RequestContext {
            subject: normalize_subject(&self.subject),
            level: ProficiencyLevel::parse(&self.level),
            exam_stage,
            days_left,
            syllabus_percent: self.syllabus_completed.min(100),
            user_type,
            daily_hours,
            topic_progress: self.topic_progress,
            completion_history: self.completion_history,
            topic_completion_history: self.topic_completion_history,
        };

        tracing::info!(
            subject = %ctx.subject,
            level = ?ctx.level,
            stage = ctx.exam_stage.as_str(),
            days_left = ctx.days_left,
            user_type = ctx.user_type.tag(),
            syllabus = ctx.syllabus_percent,
            daily_hours = ctx.daily_hours,
            "Plan request"
        );

        (ctx, note)
    }
}
