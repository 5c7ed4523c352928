//! Platform-agnostic core of the ReviewFlow client.
//!
//! Everything here compiles for both the browser and native targets. Hosts
//! supply an [`gateway::HttpTransport`], a [`session::CredentialStorage`]
//! and, for polling, a [`poller::Sleeper`].

/// Dashboard filters, paging and the query controller.
pub mod admin;
/// Render-ready analytics series.
pub mod analytics;
/// Client configuration and defaults.
pub mod config;
/// Error taxonomy shared by every operation.
pub mod error;
/// Typed API boundary.
pub mod gateway;
/// Wire and domain types.
pub mod model;
/// Page-count, row-range and page-strip calculation.
pub mod pagination;
/// Submission status polling.
pub mod poller;
/// Credential storage and the login/logout flows.
pub mod session;

#[cfg(test)]
mod testing;

pub use admin::{AdminQuery, AdminQueryController, FilterField, FilterState, LoadState};
pub use analytics::AnalyticsView;
pub use config::ClientConfig;
pub use error::ApiError;
pub use gateway::{ApiGateway, HttpRequest, HttpResponse, HttpTransport};
pub use model::{
    AdminSubmissionPage, AdminSubmissionSummary, AnalyticsSnapshot, Rating, Status, Submission,
    SubmissionReceipt,
};
pub use pagination::{paginate, PageSlot, Pagination};
pub use poller::{PollState, SubmissionPoller};
pub use session::{Credential, CredentialStorage, SessionStore};
