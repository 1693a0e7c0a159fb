//! Resource catalogue: the record kinds and their table configuration.
//!
//! The six listing pages of the hub differ only in field schema. Each is
//! described here as data ([`ResourceKind`] plus [`columns_for`]) and fed to
//! the same [`TableView`](crate::view::TableView).

mod columns;
mod kind;

pub use columns::columns_for;
pub use kind::ResourceKind;

use crate::view::TableView;

/// Builds a table view for `kind` with its default columns.
pub fn table_for(kind: ResourceKind, page_size: usize) -> TableView {
    TableView::new(columns_for(kind))
        .with_page_size(page_size)
        .with_empty_message(format!("No {} found.", kind.noun()))
}
