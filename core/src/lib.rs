//! Synchronous client SDK for the noteof notes service.
//!
//! # Overview
//! Authenticates a user with `POST /auth`, then performs CRUD on `/notes`.
//! The core builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern); the [`blocking`]
//! module pairs those builders with a [`Transport`] for callers that just
//! want one call per operation.
//!
//! # Design
//! - [`Endpoint`] resolves the base URL: an override if set, the hosted API
//!   otherwise.
//! - [`ApiClient`] is stateless and unauthenticated. [`NotesClient`] composes
//!   an `ApiClient` with a [`Session`] and is the only place a token is
//!   attached.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response). Status codes are interpreted before any body is
//!   decoded.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod blocking;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod notes;
pub mod session;
pub mod tag;
pub mod transport;
pub mod types;

pub use blocking::{Api, AuthenticatedApi};
pub use client::ApiClient;
pub use config::{Config, ConfigError};
pub use endpoint::{Endpoint, DEFAULT_ENDPOINT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notes::NotesClient;
pub use session::Session;
pub use tag::NoteTag;
pub use transport::UreqTransport;
pub use types::{Note, NoteText, Token, TokenRequest, TokenResponse, User, UserMeta};
