//! # skillhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept raw directive requests on `POST /api/directives`
//! - Hand them to the [`DirectiveRouter`](skillhub_app::router::DirectiveRouter)
//!   and return its envelope as JSON, always with `200 OK`
//! - Serve `GET /health` for liveness probes
//!
//! ## Dependency rule
//! Depends on `skillhub-app` (router and port traits) and `skillhub-domain`
//! (envelope types). Never leaks axum types into the domain.

pub mod api;
pub mod router;
pub mod state;
