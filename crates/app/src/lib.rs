//! # eventscout-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventQuery`: fetch one page of event search results
//!   - `AuthGateway`: login, registration, OTP and Google credential exchange
//! - Define **driving/inbound** use-case structs:
//!   - `DiscoveryService`: search, load more, expand descriptions
//!   - `AuthService`: one-shot account operations with user-facing messages
//!   - `IdentityBootstrap`: one-time identity provider registration
//! - Drive the domain feed state machine without knowing *how* IO works
//!
//! ## Dependency rule
//! Depends on `eventscout-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
