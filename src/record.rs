// Typed access to the queryable fields of a task

use crate::models::Task;
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;

/// Fields of a task that filters can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    Description,
    Priority,
    DueDate,
    CreatedAt,
    Completed,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Title,
        Field::Description,
        Field::Priority,
        Field::DueDate,
        Field::CreatedAt,
        Field::Completed,
    ];

    /// Name used in the persisted task file
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Description => "description",
            Field::Priority => "priority",
            Field::DueDate => "due_date",
            Field::CreatedAt => "created_at",
            Field::Completed => "completed",
        }
    }
}

/// Value of a single task field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Bool(bool),
    Date(DateTime<FixedOffset>),
}

impl FieldValue {
    /// Order two values of the same kind; `None` when the kinds differ
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.to_rfc3339()),
        }
    }
}

impl Task {
    /// Current value of `field`
    pub fn field(&self, field: Field) -> FieldValue {
        match field {
            // Loaded ids are capped at i64::MAX; only ids issued past that saturate
            Field::Id => FieldValue::Int(i64::try_from(self.id).unwrap_or(i64::MAX)),
            Field::Title => FieldValue::Text(self.title.clone()),
            Field::Description => FieldValue::Text(self.description.clone()),
            Field::Priority => FieldValue::Int(self.priority),
            Field::DueDate => FieldValue::Date(self.due_date),
            Field::CreatedAt => FieldValue::Date(self.created_at),
            Field::Completed => FieldValue::Bool(self.completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_task() -> Task {
        let ts = DateTime::parse_from_rfc3339("2026-01-02T03:04:05+00:00").unwrap();
        Task {
            id: 4,
            title: "Title".to_string(),
            description: "Desc".to_string(),
            priority: 2,
            due_date: ts,
            created_at: ts,
            completed: true,
        }
    }

    #[test]
    fn test_task_field_values() {
        let task = test_task();

        assert_eq!(task.field(Field::Id), FieldValue::Int(4));
        assert_eq!(task.field(Field::Title), FieldValue::Text("Title".to_string()));
        assert_eq!(task.field(Field::Priority), FieldValue::Int(2));
        assert_eq!(task.field(Field::Completed), FieldValue::Bool(true));
        assert_eq!(task.field(Field::DueDate), FieldValue::Date(task.due_date));
    }

    #[test]
    fn test_field_names_match_json() {
        let json = serde_json::to_value(test_task()).unwrap();
        for field in Field::ALL {
            assert!(json.get(field.name()).is_some(), "no JSON key for {:?}", field);
        }
    }

    #[test]
    fn test_compare_same_kind_only() {
        assert_eq!(FieldValue::Int(1).compare(&FieldValue::Int(2)), Some(Ordering::Less));
        assert_eq!(
            FieldValue::Text("b".into()).compare(&FieldValue::Text("a".into())),
            Some(Ordering::Greater)
        );
        assert_eq!(FieldValue::Int(1).compare(&FieldValue::Bool(true)), None);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("test".to_string()).to_string(), "test");
        assert_eq!(FieldValue::Int(42).to_string(), "42");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
    }
}
