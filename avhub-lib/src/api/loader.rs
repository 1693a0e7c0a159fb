use log::debug;
use log::warn;

use super::Generation;
use super::RowSource;
use crate::model::Record;
use crate::resource::ResourceKind;
use crate::view::FilterSet;
use crate::view::TableView;

/// Where filters are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Filters travel as query parameters.
    #[default]
    Server,
    /// The full list is fetched and filtered locally.
    Client,
}

/// Result of one [`ResourceLoader::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// Rows arrived for the latest load.
    Loaded(Vec<Record>),
    /// The latest load failed; the message is meant for display.
    Failed(String),
    /// A newer load started before this one finished.
    Superseded,
}

impl LoadOutcome {
    /// Hands the outcome to `table`.
    ///
    /// Loaded rows replace the table's rows. A failure empties the table and
    /// returns the message. A superseded outcome leaves the table untouched.
    pub fn apply(self, table: &mut TableView) -> Option<String> {
        match self {
            Self::Loaded(rows) => {
                table.set_rows(rows);
                None
            }
            Self::Failed(message) => {
                table.set_rows(Vec::<Record>::new());
                Some(message)
            }
            Self::Superseded => None,
        }
    }

    /// Returns `true` for [`LoadOutcome::Superseded`].
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Loads one resource list from a [`RowSource`], discarding stale results.
#[derive(Debug, Clone)]
pub struct ResourceLoader<S> {
    source: S,
    kind: ResourceKind,
    mode: FilterMode,
    generation: Generation,
}

impl<S: RowSource> ResourceLoader<S> {
    /// Creates a loader for `kind` using server-side filtering.
    pub fn new(source: S, kind: ResourceKind) -> Self {
        Self {
            source,
            kind,
            mode: FilterMode::default(),
            generation: Generation::new(),
        }
    }

    /// Sets where filters are evaluated.
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// The resource this loader fetches.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Invalidates any load still in flight.
    pub fn cancel(&self) {
        self.generation.invalidate();
    }

    /// Fetches the rows matching `filters`.
    ///
    /// Starting another load on the same loader before this one resolves
    /// turns this result into [`LoadOutcome::Superseded`].
    pub async fn load(&self, filters: &FilterSet) -> LoadOutcome {
        let ticket = self.generation.begin();
        debug!(
            "Loading {} (generation {}, {:?} filters)",
            self.kind,
            ticket.value(),
            self.mode
        );

        let result = match self.mode {
            FilterMode::Server => self.source.fetch_rows(self.kind, filters).await,
            FilterMode::Client => self
                .source
                .fetch_rows(self.kind, &FilterSet::new())
                .await
                .map(|rows| filters.apply(&rows, &self.kind.filter_spec())),
        };

        if !ticket.is_current() {
            warn!(
                "Discarding {} load from generation {}; a newer load started",
                self.kind,
                ticket.value()
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(rows) => {
                debug!("Loaded {} {} rows", rows.len(), self.kind);
                LoadOutcome::Loaded(rows)
            }
            Err(e) => {
                warn!("Failed to load {}: {e}", self.kind);
                LoadOutcome::Failed(e.to_string())
            }
        }
    }
}
