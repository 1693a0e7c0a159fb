use async_trait::async_trait;

use crate::error::Error;
use crate::model::Record;
use crate::resource::ResourceKind;
use crate::view::FilterSet;

/// Supplies the rows of a resource list.
///
/// Implemented by [`HubClient`](crate::HubClient); tests and offline front
/// ends can provide their own.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetches the rows of `kind` matching `filters`.
    async fn fetch_rows(&self, kind: ResourceKind, filters: &FilterSet)
    -> Result<Vec<Record>, Error>;
}

#[async_trait]
impl<S: RowSource + ?Sized> RowSource for std::sync::Arc<S> {
    async fn fetch_rows(
        &self,
        kind: ResourceKind,
        filters: &FilterSet,
    ) -> Result<Vec<Record>, Error> {
        (**self).fetch_rows(kind, filters).await
    }
}
