#[cfg(test)]
mod tests {
    use crate::error::PlannerError;

    #[test]
    fn test_error_creation() {
        let error = PlannerError::new("Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
        assert!(error.subject.is_none());
    }

    #[test]
    fn test_error_with_context() {
        let error = PlannerError::new("Test error", "test_stage")
            .with_context("Additional context");
        assert_eq!(error.context.as_deref(), Some("Additional context"));
    }

    #[test]
    fn test_error_with_subject() {
        let error = PlannerError::new("Test error", "test_stage")
            .with_subject("Math");
        assert_eq!(error.subject.as_deref(), Some("Math"));
    }

    #[test]
    fn test_error_display() {
        let error = PlannerError::new("Test error", "test_stage")
            .with_context("context")
            .with_subject("GA");
        let display = format!("{}", error);
        assert!(display.starts_with("[test_stage] Test error"));
        assert!(display.contains("(subject: GA)"));
        assert!(display.contains("(context: context)"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<Vec<i64>>("not json").unwrap_err();
        let error = PlannerError::from(err);
        assert_eq!(error.stage, "json_parse");
        assert_eq!(error.source.as_deref(), Some("serde_json"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<crate::config::PlannerConfig>("topics_dir = [").unwrap_err();
        let error = PlannerError::from(err);
        assert_eq!(error.stage, "config_parse");
    }
}
