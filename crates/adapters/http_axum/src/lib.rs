//! # eventscout-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-rendered discovery page** (`/`) with search,
//!   load-more and per-event "Read More" controls
//! - Serve the **account pages** (`/login`, `/register`, OTP verification and
//!   the Google sign-in callback)
//! - Serve a small **JSON API** over the same feed (`/api/feed`, …)
//!
//! ## No-JS approach
//! - Every page is rendered server-side as complete HTML.
//! - Controls are `<form>` elements that POST back and redirect (PRG pattern).
//! - While a query is in flight the discovery page carries
//!   `<meta http-equiv="refresh">` so it picks up the result on its own.
//!
//! ## Dependency rule
//! Depends on `eventscout-app` (for port traits and services) and
//! `eventscout-domain` (for view types). Never leaks axum types into the
//! domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
