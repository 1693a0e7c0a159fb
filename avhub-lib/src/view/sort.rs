//! Sort state and stable row ordering.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::model::Record;
use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// The active sort column and direction, or none.
///
/// A state without a key leaves rows in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    key: Option<String>,
    direction: Direction,
}

impl SortState {
    /// No sort applied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending sort on a column key.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a column key.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Direction::Desc,
        }
    }

    /// Returns the sorted column key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the sort direction.
    ///
    /// Meaningless while [`key`](Self::key) is `None`.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction if the view is sorted by `key`.
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }

    /// Header-click transition: flip on the same key, otherwise ascending on
    /// the new key.
    pub(crate) fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggle();
        } else {
            self.key = Some(key.to_string());
            self.direction = Direction::Asc;
        }
    }
}

/// Three-way comparison of two field values.
///
/// Null, absent and empty-string values are equal to each other and sort
/// before everything else. Remaining values are grouped booleans, then
/// numbers, then text, so the comparison is a total order even for columns
/// holding mixed types.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (rank_a, rank_b) = (rank(a), rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ if rank_a == 2 => {
            let x = a.as_f64().unwrap_or_default();
            let y = b.as_f64().unwrap_or_default();
            x.total_cmp(&y)
        }
        _ if rank_a == 3 => text(a).cmp(&text(b)),
        _ => Ordering::Equal,
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        v if v.is_empty() => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        _ => 3,
    }
}

fn text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Computes the display order of `rows` as a permutation of their indices.
///
/// Without a sort key the identity permutation is returned. Ties keep their
/// input order in both directions.
pub fn order_indices(rows: &[Record], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(key) = sort.key() else {
        return order;
    };
    let direction = sort.direction();
    order.sort_by(|&a, &b| {
        direction
            .apply(compare_values(rows[a].value(key), rows[b].value(key)))
            .then(a.cmp(&b))
    });
    order
}

/// Returns `rows` in display order for `sort`.
pub fn compute_ordered_rows<'a>(rows: &'a [Record], sort: &SortState) -> Vec<&'a Record> {
    order_indices(rows, sort)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(k: impl Into<Value>, id: &str) -> Record {
        Record::new().set("k", k).set("id", id)
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.value("id").to_string()).collect()
    }

    #[test]
    fn test_toggle_transitions() {
        let mut sort = SortState::none();
        sort.toggle("name");
        assert_eq!(sort, SortState::asc("name"));
        sort.toggle("name");
        assert_eq!(sort, SortState::desc("name"));
        sort.toggle("status");
        assert_eq!(sort, SortState::asc("status"));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let rows = vec![row(10i64, "a"), row(9i64, "b"), row(9.5, "c")];
        let ordered = compute_ordered_rows(&rows, &SortState::asc("k"));
        assert_eq!(ids(&ordered), ["b", "c", "a"]);
    }

    #[test]
    fn test_empty_string_ties_with_null() {
        let rows = vec![row("", "a"), row(Value::Null, "b"), row("x", "c")];
        let ordered = compute_ordered_rows(&rows, &SortState::desc("k"));
        assert_eq!(ids(&ordered), ["c", "a", "b"]);
    }

    #[test]
    fn test_absent_field_sorts_first() {
        let rows = vec![row("b", "a"), Record::new().set("id", "b")];
        let ordered = compute_ordered_rows(&rows, &SortState::asc("k"));
        assert_eq!(ids(&ordered), ["b", "a"]);
    }

    #[test]
    fn test_mixed_types_are_grouped() {
        let rows = vec![row("text", "a"), row(1i64, "b"), row(true, "c"), row(Value::Null, "d")];
        let ordered = compute_ordered_rows(&rows, &SortState::asc("k"));
        assert_eq!(ids(&ordered), ["d", "c", "b", "a"]);
    }
}
