//! AV Hub client library
//!
//! Browses the hub's autonomous-vehicle policy, deployment, funding, safety,
//! resource and curbside records. The heart of the crate is the
//! [`view::TableView`] engine, which sorts and paginates any row set for
//! display. Around it sit the per-kind [`resource`] catalogue, the
//! [`HubClient`] REST client and the [`api::ResourceLoader`] feeding one into
//! the other.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod resource;
pub mod session;
pub mod view;

mod client;
mod retry;

pub use client::*;
pub use config::HubConfig;
pub use retry::RetryConfig;
pub use session::AdminSession;
pub use session::SessionContext;
pub use view::FilterSet;
