//! Filter state shared by client-side filtering and query building.

use std::collections::BTreeMap;

use log::warn;

use crate::model::Record;

/// Maps a filter query parameter onto the record field it constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Query parameter name understood by the API.
    pub param: &'static str,
    /// Record field compared against the parameter value.
    pub field: &'static str,
}

impl FilterField {
    /// Creates a mapping where parameter and field differ.
    pub const fn mapped(param: &'static str, field: &'static str) -> Self {
        Self { param, field }
    }

    /// Creates a mapping where parameter and field share a name.
    pub const fn same(name: &'static str) -> Self {
        Self {
            param: name,
            field: name,
        }
    }
}

/// The filterable and searchable fields of one kind of record.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec<'a> {
    /// Equality filters accepted.
    pub fields: &'a [FilterField],
    /// Fields scanned by free-text search.
    pub search: &'a [&'a str],
}

impl FilterSpec<'_> {
    /// Looks up the field behind a query parameter.
    pub fn field_for(&self, param: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.param == param)
            .map(|f| f.field)
    }
}

/// A set of equality filters plus optional search text.
///
/// All filters compose with AND. Setting a filter to an empty value removes it,
/// so a cleared dropdown means "any".
///
/// # Example
///
/// ```
/// use avhub_lib::view::FilterSet;
///
/// let filters = FilterSet::new()
///     .with("status", "Active")
///     .with("state", "")
///     .with_search("robotaxi");
///
/// assert_eq!(filters.get("status"), Some("Active"));
/// assert_eq!(filters.get("state"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: BTreeMap<String, String>,
    search: Option<String>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a filter (builder pattern).
    pub fn with(mut self, param: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(param, value);
        self
    }

    /// Sets the search text (builder pattern).
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    /// Sets or removes a filter. Returns `true` if the set changed.
    pub fn set(&mut self, param: impl Into<String>, value: impl Into<String>) -> bool {
        let param = param.into();
        let value = value.into();
        if value.trim().is_empty() {
            return self.filters.remove(&param).is_some();
        }
        self.filters.insert(param, value.clone()) != Some(value)
    }

    /// Removes a filter. Returns `true` if it was present.
    pub fn remove(&mut self, param: &str) -> bool {
        self.filters.remove(param).is_some()
    }

    /// Sets the search text; blank text clears it. Returns `true` if it changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        let search = search.trim();
        let next = (!search.is_empty()).then(|| search.to_string());
        let changed = next != self.search;
        self.search = next;
        changed
    }

    /// Clears all filters and the search text.
    pub fn clear(&mut self) {
        self.filters.clear();
        self.search = None;
    }

    /// Returns the value of a filter.
    pub fn get(&self, param: &str) -> Option<&str> {
        self.filters.get(param).map(|s| s.as_str())
    }

    /// Returns the search text.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns `true` if nothing constrains the rows.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.search.is_none()
    }

    /// Iterates filters in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Drops filters `spec` does not declare and returns their names.
    pub fn retain_known(&mut self, spec: &FilterSpec<'_>) -> Vec<String> {
        let unknown: Vec<String> = self
            .filters
            .keys()
            .filter(|param| spec.field_for(param).is_none())
            .cloned()
            .collect();
        for param in &unknown {
            warn!("dropping unsupported filter '{}'", param);
            self.filters.remove(param);
        }
        unknown
    }

    /// Returns `true` if `record` passes every filter and the search.
    ///
    /// Filters `spec` does not declare are ignored. Search is a
    /// case-insensitive substring match over any of `spec.search`.
    pub fn matches(&self, record: &Record, spec: &FilterSpec<'_>) -> bool {
        let filters_pass = self.filters.iter().all(|(param, expected)| {
            match spec.field_for(param) {
                Some(field) => record.value(field).to_string() == *expected,
                None => true,
            }
        });
        if !filters_pass {
            return false;
        }
        match &self.search {
            None => true,
            Some(search) => {
                let needle = search.to_lowercase();
                spec.search.iter().any(|field| {
                    record
                        .value(field)
                        .to_string()
                        .to_lowercase()
                        .contains(&needle)
                })
            }
        }
    }

    /// Returns the records of `rows` that match, in their original order.
    pub fn apply(&self, rows: &[Record], spec: &FilterSpec<'_>) -> Vec<Record> {
        rows.iter()
            .filter(|row| self.matches(row, spec))
            .cloned()
            .collect()
    }

    /// Query parameters for this set: filters in parameter order, then `search`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs
    }
}
