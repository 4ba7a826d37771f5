use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub group_id: i64,
    #[serde(default)]
    pub is_completed: bool,
    /// Present on list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

/// Equality filters applied server-side. `None` means "any".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub group: Option<i64>,
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// Query parameters in the order the backend documents them.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(group) = self.group {
            query.push(("group", group.to_string()));
        }
        if let Some(completed) = self.completed {
            query.push(("completed", completed.to_string()));
        }
        query
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.group.is_none() && self.completed.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub group_id: i64,
}

impl NewTask {
    /// Trims user input. Returns `None` when the title is blank; an empty
    /// description is dropped.
    #[must_use]
    pub fn from_input(title: &str, description: &str, group_id: i64) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let description = description.trim();
        Some(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            group_id,
        })
    }
}

/// Partial update; only `Some` fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl TaskUpdate {
    #[must_use]
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_query() {
        assert!(TaskFilter::default().query().is_empty());
        assert!(TaskFilter::default().is_empty());

        let filter = TaskFilter {
            group: Some(4),
            completed: Some(false),
        };
        assert_eq!(
            filter.query(),
            vec![("group", "4".to_string()), ("completed", "false".to_string())]
        );

        let filter = TaskFilter {
            group: None,
            completed: Some(true),
        };
        assert_eq!(filter.query(), vec![("completed", "true".to_string())]);
    }

    #[test]
    fn new_task_trims_and_drops_empty_description() {
        assert_eq!(NewTask::from_input("   ", "desc", 1), None);

        let task = NewTask::from_input("  Buy milk ", "   ", 2);
        assert_eq!(
            task,
            Some(NewTask {
                title: "Buy milk".to_string(),
                description: None,
                group_id: 2,
            })
        );

        let body = serde_json::to_value(task).unwrap_or_default();
        assert_eq!(body, json!({"title": "Buy milk", "group_id": 2}));
    }

    #[test]
    fn completion_update_only_sends_flag() {
        let body = serde_json::to_value(TaskUpdate::completion(true)).unwrap_or_default();
        assert_eq!(body, json!({"is_completed": true}));
        assert!(TaskUpdate::default().is_empty());
        assert!(!TaskUpdate::completion(false).is_empty());
    }

    #[test]
    fn task_from_list_response() {
        let body = r#"{"id":9,"title":"Write report","description":null,"is_completed":true,
            "user_id":1,"group_id":2,"created_at":"2024-05-01T10:00:00",
            "updated_at":"2024-05-01T10:00:00","group_name":"Work","username":"alice"}"#;
        let task: Option<Task> = serde_json::from_str(body).ok();
        assert_eq!(
            task,
            Some(Task {
                id: 9,
                title: "Write report".to_string(),
                description: None,
                group_id: 2,
                is_completed: true,
                group_name: Some("Work".to_string()),
            })
        );
    }
}
