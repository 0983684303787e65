//! Route gating over the published session.
//!
//! Provides:
//! - `Screen` / `RouteSet` - Pure screen-set decision from a session snapshot
//! - `RouteGate` - Change-notification handle for navigation consumers

pub mod gate;

pub use gate::{RouteGate, RouteSet, Screen};
