//! # eventscout-domain
//!
//! Pure domain model for the eventscout event discovery client.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **event records** as fetched from the events API
//! - Define the **search filter** and **page requests**
//! - Define the **feed**: the explicit state machine behind search,
//!   load-more, result accumulation and loading/error status
//! - Define **expansion** state and the description truncation rule
//! - Define the account values exchanged with the auth backend
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod auth;
pub mod event;
pub mod expansion;
pub mod feed;
pub mod filter;
pub mod page;
