//! Subcommand implementations.

use std::process::ExitCode;

use avhub_lib::FilterSet;
use avhub_lib::HubClient;
use avhub_lib::HubConfig;
use avhub_lib::SessionContext;
use avhub_lib::api::FilterMode;
use avhub_lib::api::ResourceLoader;
use avhub_lib::error::ConfigError;
use avhub_lib::error::Error;
use avhub_lib::model::Record;
use avhub_lib::model::Value;
use avhub_lib::resource::ResourceKind;
use avhub_lib::resource::table_for;
use log::info;

use crate::text;

/// Splits `key=value`. The value may contain further `=`.
pub fn parse_pair(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::InvalidPair(raw.to_string())),
    }
}

/// Builds a filter set from `key=value` pairs and optional search text.
pub fn parse_filters(pairs: &[String], search: Option<&str>) -> Result<FilterSet, ConfigError> {
    let mut filters = FilterSet::new();
    for raw in pairs {
        let (key, value) = parse_pair(raw)?;
        filters.set(key, value);
    }
    if let Some(search) = search {
        filters.set_search(search);
    }
    Ok(filters)
}

/// Builds a record from an optional JSON object and `key=value` overrides.
///
/// Override values are parsed as JSON scalars where possible (`true`, `3`,
/// `null`), and kept as strings otherwise.
pub fn parse_record(json: Option<&str>, fields: &[String]) -> Result<Record, ConfigError> {
    let mut record = match json {
        Some(json) => {
            let value: serde_json::Value = serde_json::from_str(json)
                .map_err(|e| ConfigError::InvalidPayload(e.to_string()))?;
            if !value.is_object() {
                return Err(ConfigError::InvalidPayload(
                    "expected a JSON object".to_string(),
                ));
            }
            serde_json::from_value(value).map_err(|e| ConfigError::InvalidPayload(e.to_string()))?
        }
        None => Record::new(),
    };

    for raw in fields {
        let (key, value) = parse_pair(raw)?;
        let value = match serde_json::from_str::<serde_json::Value>(&value) {
            Ok(parsed) if !parsed.is_object() && !parsed.is_array() => Value::from(parsed),
            _ => Value::from(value),
        };
        record.insert(key, value);
    }

    if record.is_empty() {
        return Err(ConfigError::InvalidPayload("no fields given".to_string()));
    }
    Ok(record)
}

/// Options of the `list` command.
pub struct ListArgs {
    pub kind: ResourceKind,
    pub filters: FilterSet,
    pub sort: Vec<String>,
    pub page: usize,
    pub client_side: bool,
}

/// Loads a resource list, applies header clicks and prints one page.
pub async fn list(client: &HubClient, config: &HubConfig, args: ListArgs) -> ExitCode {
    let ListArgs {
        kind,
        mut filters,
        sort,
        page,
        client_side,
    } = args;

    for dropped in filters.retain_known(&kind.filter_spec()) {
        eprintln!("Ignoring filter {dropped:?}: {kind} has no such field");
    }

    let mode = if client_side {
        FilterMode::Client
    } else {
        FilterMode::Server
    };
    let loader = ResourceLoader::new(client.clone(), kind).with_mode(mode);
    let mut table = table_for(kind, config.page_size);

    let failure = loader.load(&filters).await.apply(&mut table);
    if let Some(message) = &failure {
        eprintln!("Error: {message}");
    }

    for key in &sort {
        if !table.set_sort(key) {
            eprintln!("Column {key:?} is not sortable");
        }
    }

    let requested = page.saturating_sub(1);
    let index = table.set_page(requested);
    if index != requested {
        info!("Page {page} out of range, showing page {}", index + 1);
    }

    print!("{}", text::table(&table.render()));

    if failure.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints the home page summary: counts per kind, then the newest policies
/// and incidents as tables.
pub async fn summary(client: &HubClient, config: &HubConfig) -> Result<(), Error> {
    let summary = client.dashboard().await?;
    print!("{}", text::totals(&summary));

    let recent = [
        (ResourceKind::Policies, summary.recent_policies),
        (ResourceKind::Safety, summary.recent_incidents),
    ];
    for (kind, rows) in recent {
        let mut table = table_for(kind, config.page_size);
        table.set_rows(rows);
        println!();
        println!("Recent {}", kind.noun());
        print!("{}", text::table(&table.render()));
    }
    Ok(())
}

/// Prints one record.
pub async fn show(client: &HubClient, kind: ResourceKind, id: &str) -> Result<(), Error> {
    let record = client.get(kind, id).await?;
    print!("{}", text::record(&record));
    Ok(())
}

/// Prints the CSV export link.
pub fn export_url(client: &HubClient, kind: ResourceKind, filters: &FilterSet) -> Result<(), Error> {
    let url = client.export_csv_url(kind, filters)?;
    println!("{url}");
    Ok(())
}

/// An admin write.
pub enum AdminAction {
    Create(Record),
    Update(String, Record),
    Delete(String),
}

/// Runs an admin write with the credentials held in `ctx`.
pub async fn admin(
    client: &HubClient,
    ctx: &SessionContext,
    kind: ResourceKind,
    action: AdminAction,
) -> Result<(), Error> {
    let session = ctx.session()?;
    match action {
        AdminAction::Create(record) => {
            let created = client.create(kind, &record, session).await?;
            print!("{}", text::record(&created));
        }
        AdminAction::Update(id, record) => {
            let updated = client.update(kind, &id, &record, session).await?;
            print!("{}", text::record(&updated));
        }
        AdminAction::Delete(id) => {
            client.delete(kind, &id, session).await?;
            println!("Deleted {kind}/{id}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("status=Active").unwrap(),
            ("status".to_string(), "Active".to_string())
        );
        assert_eq!(
            parse_pair("search=a=b").unwrap(),
            ("search".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_pair("status"),
            Err(ConfigError::InvalidPair("status".to_string()))
        );
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(
            &["state=CA".to_string(), "status=".to_string()],
            Some("  waymo "),
        )
        .unwrap();
        assert_eq!(filters.get("state"), Some("CA"));
        assert_eq!(filters.get("status"), None);
        assert_eq!(filters.search(), Some("waymo"));
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record(
            Some(r#"{"title": "AV Act", "status": "Draft"}"#),
            &[
                "status=Enacted".to_string(),
                "year=2024".to_string(),
                "is_active=true".to_string(),
                "summary=".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(record.get_str("title"), Some("AV Act"));
        assert_eq!(record.get_str("status"), Some("Enacted"));
        assert_eq!(record.value("year"), &Value::Int(2024));
        assert_eq!(record.value("is_active"), &Value::Bool(true));
        assert_eq!(record.get_str("summary"), Some(""));
    }

    #[test]
    fn test_parse_record_rejects_bad_payloads() {
        assert!(matches!(
            parse_record(Some("[1, 2]"), &[]),
            Err(ConfigError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_record(Some("{oops"), &[]),
            Err(ConfigError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_record(None, &[]),
            Err(ConfigError::InvalidPayload(_))
        ));
    }
}
