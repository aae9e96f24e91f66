//! folio-client — Typed client for the folio portfolio/blog backend.
//!
//! Wraps the REST API behind a uniform request/error shape, tracks the
//! admin auth session, and keeps per-section list state for the admin
//! console. The backend itself is an external collaborator; everything
//! here is request plumbing and client-side bookkeeping.

pub mod auth;
pub mod content;
pub mod envelope;
pub mod http;
pub mod public_forms;
pub mod roster;
pub mod token;
pub mod upload;

pub use auth::{AuthApi, AuthTransport, Session, SessionStatus};
pub use content::ContentApi;
pub use http::ApiClient;
pub use public_forms::{CommentsClient, SubscribeClient};
pub use roster::{LoadState, Roster};
pub use token::TokenSlot;
pub use upload::{UploadClient, UploadTarget};
