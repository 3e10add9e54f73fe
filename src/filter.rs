// Query filtering for tasks

use crate::models::Task;
use crate::record::{Field, FieldValue};
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;

/// Filter for querying tasks
#[derive(Debug, Clone)]
pub struct Filter {
    /// Field to filter on
    pub field: Field,
    /// Comparison operator
    pub op: FilterOp,
    /// Value to compare against
    pub value: FieldValue,
}

/// Comparison operators for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,       // ==
    Ne,       // !=
    Gt,       // >
    Lt,       // <
    Gte,      // >=
    Lte,      // <=
    Contains, // case-insensitive substring, text fields only
}

impl Filter {
    pub fn new(field: Field, op: FilterOp, value: FieldValue) -> Self {
        Self { field, op, value }
    }

    /// Tasks whose completion flag equals `completed`
    pub fn completed(completed: bool) -> Self {
        Self::new(Field::Completed, FilterOp::Eq, FieldValue::Bool(completed))
    }

    pub fn priority(op: FilterOp, level: i64) -> Self {
        Self::new(Field::Priority, op, FieldValue::Int(level))
    }

    /// Tasks due strictly before `date`
    pub fn due_before(date: DateTime<FixedOffset>) -> Self {
        Self::new(Field::DueDate, FilterOp::Lt, FieldValue::Date(date))
    }

    /// Check a task against this filter
    ///
    /// Values of a different kind than the field never match.
    pub fn matches(&self, task: &Task) -> bool {
        let actual = task.field(self.field);

        if self.op == FilterOp::Contains {
            return match (&actual, &self.value) {
                (FieldValue::Text(haystack), FieldValue::Text(needle)) => contains_ignore_case(haystack, needle),
                _ => false,
            };
        }

        match actual.compare(&self.value) {
            Some(ord) => self.op.accepts(ord),
            None => false,
        }
    }
}

impl FilterOp {
    fn accepts(self, ord: Ordering) -> bool {
        match self {
            FilterOp::Eq => ord == Ordering::Equal,
            FilterOp::Ne => ord != Ordering::Equal,
            FilterOp::Gt => ord == Ordering::Greater,
            FilterOp::Lt => ord == Ordering::Less,
            FilterOp::Gte => ord != Ordering::Less,
            FilterOp::Lte => ord != Ordering::Greater,
            FilterOp::Contains => false,
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "="),
            FilterOp::Ne => write!(f, "!="),
            FilterOp::Gt => write!(f, ">"),
            FilterOp::Lt => write!(f, "<"),
            FilterOp::Gte => write!(f, ">="),
            FilterOp::Lte => write!(f, "<="),
            FilterOp::Contains => write!(f, "contains"),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field.name(), self.op, self.value)
    }
}

/// Case-insensitive substring test; an empty needle always matches
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
