//! Default table columns for each resource kind.

use crate::model::Record;
use crate::model::Value;
use crate::view::Cell;
use crate::view::Column;

use super::ResourceKind;

fn status(key: &str, label: &str) -> Column {
    Column::new(key, label).render(|_, v| badge(v))
}

fn badge(value: &Value) -> Cell {
    if value.is_empty() {
        Cell::Placeholder
    } else {
        Cell::badge(value.to_string())
    }
}

/// Dates arrive as ISO strings; timestamps are cut to the date part.
fn date(key: &str, label: &str) -> Column {
    Column::new(key, label).render(|_, v| match v.as_str() {
        Some(s) if !s.is_empty() => Cell::text(s.get(..10).unwrap_or(s)),
        _ if v.is_empty() => Cell::Placeholder,
        _ => Cell::text(v.to_string()),
    })
}

fn link(key: &str, label: &str) -> Column {
    Column::new(key, label).unsortable().render(|_, v| match v.as_str() {
        Some(href) if !href.is_empty() => Cell::link("View", href),
        _ => Cell::Placeholder,
    })
}

fn yes_no(key: &str, label: &str) -> Column {
    Column::new(key, label).render(|_, v| match v.as_bool() {
        Some(true) => Cell::text("Yes"),
        Some(false) => Cell::text("No"),
        None => Cell::Placeholder,
    })
}

/// `City, ST` from the row's city and state code (or state name).
fn location(label: &str) -> Column {
    Column::new("city", label).render(|row: &Record, city: &Value| {
        let state = match row.value("state_code") {
            v if v.is_empty() => row.value("state"),
            v => v,
        };
        match (city.is_empty(), state.is_empty()) {
            (true, true) => Cell::Placeholder,
            (false, true) => Cell::text(city.to_string()),
            (true, false) => Cell::text(state.to_string()),
            (false, false) => Cell::text(format!("{}, {}", city, state)),
        }
    })
}

/// Returns the default column set for `kind`.
pub fn columns_for(kind: ResourceKind) -> Vec<Column> {
    match kind {
        ResourceKind::Policies => vec![
            Column::new("jurisdiction", "Jurisdiction"),
            Column::new("policy_type", "Type"),
            Column::new("title", "Title"),
            Column::new("vehicle_class", "Vehicle Class"),
            date("date_enacted", "Enacted"),
            status("status", "Status"),
            link("source_url", "Source"),
        ],
        ResourceKind::Deployments => vec![
            Column::new("operator", "Operator"),
            Column::new("program_name", "Program"),
            location("Location"),
            Column::new("vehicle_type", "Vehicle"),
            status("status", "Status"),
            date("start_date", "Started"),
            link("source_url", "Source"),
        ],
        ResourceKind::Funding => vec![
            Column::new("program_name", "Program"),
            Column::new("agency", "Agency"),
            Column::new("funding_type", "Type"),
            Column::new("total_funding", "Total"),
            date("application_deadline", "Deadline"),
            status("status", "Status"),
            link("source_url", "Source"),
        ],
        ResourceKind::Safety => vec![
            date("date", "Date"),
            Column::new("manufacturer", "Manufacturer"),
            Column::new("vehicle_model", "Model"),
            location("Location"),
            Column::new("incident_type", "Type"),
            status("severity", "Severity"),
            yes_no("ads_engaged", "ADS Engaged"),
        ],
        ResourceKind::Resources => vec![
            Column::new("title", "Title"),
            Column::new("author_org", "Author"),
            Column::new("resource_type", "Type"),
            Column::new("topic_area", "Topic"),
            date("publication_date", "Published"),
            link("url", "Link"),
        ],
        ResourceKind::Curbside => vec![
            location("Location"),
            Column::new("regulation_type", "Regulation"),
            Column::new("applies_to", "Applies To"),
            date("date_adopted", "Adopted"),
            status("status", "Status"),
            link("source_url", "Source"),
        ],
    }
}
