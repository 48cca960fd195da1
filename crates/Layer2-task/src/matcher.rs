//! Task matching and grouping

use crate::task::TaskRecord;

/// Tasks whose definition name contains `pattern` (case-sensitive), in input order.
///
/// An empty result is not an error here; callers turn it into
/// `Error::NoMatchingTasks`.
pub fn find_matching(tasks: &[TaskRecord], pattern: &str) -> Vec<TaskRecord> {
    tasks
        .iter()
        .filter(|t| t.definition_name.contains(pattern))
        .cloned()
        .collect()
}

/// Tasks sharing one task definition family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    pub definition_name: String,
    pub tasks: Vec<TaskRecord>,
}

/// Group tasks by definition name, groups ordered by first appearance
pub fn group_by_definition(tasks: Vec<TaskRecord>) -> Vec<TaskGroup> {
    let mut groups: Vec<TaskGroup> = Vec::new();
    for task in tasks {
        match groups
            .iter_mut()
            .find(|g| g.definition_name == task.definition_name)
        {
            Some(group) => group.tasks.push(task),
            None => groups.push(TaskGroup {
                definition_name: task.definition_name.clone(),
                tasks: vec![task],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, def: &str) -> TaskRecord {
        TaskRecord::new(format!("arn/task/prod/{id}"), def, vec!["app".to_string()])
    }

    fn sample() -> Vec<TaskRecord> {
        vec![
            task("1", "web-app"),
            task("2", "worker"),
            task("3", "web-app-canary"),
            task("4", "Web-App"),
        ]
    }

    #[test]
    fn test_substring_case_sensitive() {
        let matched = find_matching(&sample(), "web-app");
        let ids: Vec<&str> = matched.iter().map(|t| t.task_id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let tasks = sample();
        assert_eq!(find_matching(&tasks, ""), tasks);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(find_matching(&sample(), "billing").is_empty());
    }

    #[test]
    fn test_idempotent_and_all_contain_pattern() {
        let tasks = sample();
        for pattern in ["web", "app", "-", "worker", "zzz", ""] {
            let once = find_matching(&tasks, pattern);
            assert!(once.iter().all(|t| t.definition_name.contains(pattern)));
            assert_eq!(find_matching(&once, pattern), once);
        }
    }

    #[test]
    fn test_group_by_definition_first_seen_order() {
        let tasks = vec![
            task("1", "worker"),
            task("2", "web-app"),
            task("3", "worker"),
        ];
        let groups = group_by_definition(tasks);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].definition_name, "worker");
        assert_eq!(groups[0].tasks.len(), 2);
        assert_eq!(groups[1].definition_name, "web-app");
    }
}
