//! Loading rows into a table through a [`RowSource`].

use std::collections::VecDeque;
use std::pin::pin;
use std::sync::Mutex;

use async_trait::async_trait;
use avhub_lib::api::FilterMode;
use avhub_lib::api::LoadOutcome;
use avhub_lib::api::ResourceLoader;
use avhub_lib::api::RowSource;
use avhub_lib::error::ApiError;
use avhub_lib::error::Error;
use avhub_lib::model::Record;
use avhub_lib::resource::ResourceKind;
use avhub_lib::resource::table_for;
use avhub_lib::view::FilterSet;
use futures::poll;
use tokio::sync::oneshot;

type Reply = Result<Vec<Record>, Error>;

/// Answers each fetch with whatever is sent on the next queued channel.
#[derive(Default)]
struct GatedSource {
    gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    seen: Mutex<Vec<FilterSet>>,
}

impl GatedSource {
    fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl RowSource for GatedSource {
    async fn fetch_rows(&self, _kind: ResourceKind, filters: &FilterSet) -> Reply {
        self.seen.lock().unwrap().push(filters.clone());
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::parse("gate dropped").into())),
            None => Ok(Vec::new()),
        }
    }
}

fn deployment(id: &str, status: &str) -> Record {
    Record::new()
        .set("id", id)
        .set("operator", "Waymo")
        .set("status", status)
}

#[tokio::test]
async fn newer_load_supersedes_older() {
    let source = GatedSource::default();
    let first_gate = source.gate();
    let second_gate = source.gate();
    let loader = ResourceLoader::new(source, ResourceKind::Deployments);
    let filters = FilterSet::new();

    let mut first = pin!(loader.load(&filters));
    assert!(poll!(first.as_mut()).is_pending());

    let mut second = pin!(loader.load(&filters));
    assert!(poll!(second.as_mut()).is_pending());

    first_gate
        .send(Ok(vec![deployment("old", "Active")]))
        .unwrap();
    let stale = first.await;
    assert!(stale.is_superseded());

    second_gate
        .send(Ok(vec![deployment("new", "Active")]))
        .unwrap();
    let mut table = table_for(ResourceKind::Deployments, 10);
    assert_eq!(second.await.apply(&mut table), None);
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].get_str("id"), Some("new"));

    // A stale outcome leaves the table alone.
    assert_eq!(stale.apply(&mut table), None);
    assert_eq!(table.len(), 1);
}

#[tokio::test]
async fn cancel_discards_in_flight_load() {
    let source = GatedSource::default();
    let gate = source.gate();
    let loader = ResourceLoader::new(source, ResourceKind::Funding);
    let filters = FilterSet::new();

    let mut load = pin!(loader.load(&filters));
    assert!(poll!(load.as_mut()).is_pending());
    loader.cancel();

    gate.send(Ok(vec![Record::new().set("id", 1)])).unwrap();
    assert!(load.await.is_superseded());
}

#[tokio::test]
async fn failure_empties_table_and_reports() {
    let source = GatedSource::default();
    source.gate().send(Err(ApiError::http(500, "boom").into())).unwrap();
    let loader = ResourceLoader::new(source, ResourceKind::Safety);

    let mut table = table_for(ResourceKind::Safety, 10);
    table.set_rows(vec![Record::new().set("id", 1)]);

    let outcome = loader.load(&FilterSet::new()).await;
    assert!(matches!(&outcome, LoadOutcome::Failed(message) if message == "HTTP 500: boom"));
    assert_eq!(outcome.apply(&mut table).as_deref(), Some("HTTP 500: boom"));
    assert!(table.is_empty());
    assert!(table.render().is_empty());
}

#[tokio::test]
async fn server_mode_forwards_filters() {
    let source = std::sync::Arc::new(GatedSource::default());
    let loader = ResourceLoader::new(std::sync::Arc::clone(&source), ResourceKind::Policies);
    let filters = FilterSet::new().with("state_code", "CA");

    let outcome = loader.load(&filters).await;
    assert!(matches!(outcome, LoadOutcome::Loaded(ref rows) if rows.is_empty()));
    assert_eq!(*source.seen.lock().unwrap(), [filters]);
}

#[tokio::test]
async fn client_mode_filters_locally() {
    let source = std::sync::Arc::new(GatedSource::default());
    source
        .gate()
        .send(Ok(vec![
            deployment("a", "Active"),
            deployment("b", "Paused"),
            deployment("c", "Active"),
        ]))
        .unwrap();

    let loader = ResourceLoader::new(std::sync::Arc::clone(&source), ResourceKind::Deployments)
        .with_mode(FilterMode::Client);
    let filters = FilterSet::new().with("status", "Active");

    let LoadOutcome::Loaded(rows) = loader.load(&filters).await else {
        panic!("expected rows");
    };
    let ids: Vec<_> = rows.iter().filter_map(|r| r.get_str("id")).collect();
    assert_eq!(ids, ["a", "c"]);

    let seen = source.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_empty());
}
