#[cfg(test)]
mod tests {
    use crate::brain::strategy::Category;
    use crate::brain::{apply_performance, enforce_ceiling, format_hours, GeneratedTask, Priority, MAX_TASKS};

    fn task(label: &str, priority: Priority, daily_habit: bool) -> GeneratedTask {
        GeneratedTask {
            subject: "Math".to_string(),
            category: Category::Practice,
            label: label.to_string(),
            duration_text: format_hours(1.0),
            duration_hours: 1.0,
            priority,
            strategy_tag: "REPEATER | Prelims | 45D".to_string(),
            topic: None,
            sub_topic: None,
            topic_id: None,
            impact: None,
            daily_habit,
        }
    }

    fn labels(tasks: &[GeneratedTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn test_ceiling_leaves_short_lists_alone() {
        let mut tasks: Vec<_> = (0..MAX_TASKS)
            .map(|i| task(&format!("t{}", i), Priority::Normal, false))
            .collect();
        enforce_ceiling(&mut tasks);
        assert_eq!(tasks.len(), MAX_TASKS);
        assert_eq!(tasks[0].label, "t0");
    }

    #[test]
    fn test_ceiling_keeps_protected_then_optional_in_order() {
        let mut tasks = Vec::new();
        for i in 0..8 {
            tasks.push(task(&format!("opt{}", i), Priority::Normal, false));
        }
        tasks.push(task("drill", Priority::Normal, true));
        for i in 0..4 {
            tasks.push(task(&format!("urgent{}", i), Priority::High, false));
        }

        enforce_ceiling(&mut tasks);

        assert_eq!(tasks.len(), MAX_TASKS);
        assert_eq!(
            labels(&tasks),
            vec!["drill", "urgent0", "urgent1", "urgent2", "urgent3", "opt0", "opt1", "opt2", "opt3", "opt4"]
        );
    }

    #[test]
    fn test_ceiling_truncates_when_protected_overflow() {
        let mut tasks: Vec<_> = (0..12)
            .map(|i| task(&format!("urgent{}", i), Priority::High, false))
            .collect();
        tasks.push(task("optional", Priority::Normal, false));

        enforce_ceiling(&mut tasks);

        assert_eq!(tasks.len(), MAX_TASKS);
        assert_eq!(tasks[0].label, "urgent0");
        assert_eq!(tasks[9].label, "urgent9");
        assert!(tasks.iter().all(|t| t.priority == Priority::High));
    }

    #[test]
    fn test_performance_only_shrinks() {
        let mut tasks: Vec<_> = (0..5)
            .map(|i| task(&format!("t{}", i), Priority::Normal, false))
            .collect();

        apply_performance(&mut tasks, 1.2);
        assert_eq!(tasks.len(), 5);

        apply_performance(&mut tasks, 0.7);
        // floor(5 * 0.7) = 3
        assert_eq!(labels(&tasks), vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(1.0), "1.0 Hrs");
        assert_eq!(format_hours(1.5), "1.5 Hrs");
        assert_eq!(format_hours(0.75), "0.75 Hrs");
        assert_eq!(format_hours(1.0 * 0.7), "0.7 Hrs");
        assert_eq!(format_hours(0.33), "0.33 Hrs");
    }
}
