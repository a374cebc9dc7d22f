//! # il-06-service-registry
//!
//! Service Registry, Service Destinations and Error-Code Registry for
//! Identity-Ledger.
//!
//! ## Two-Level Destination Control
//!
//! | Record | Owner | Switch |
//! |--------|-------|--------|
//! | `ServiceApproval` | NDID | `Register/Disable/EnableServiceDestinationByNDID` |
//! | `ServiceDestination` | AS | `Register/Update/Disable/EnableServiceDestination` |
//!
//! Disabling an approval suspends the matching destination; the AS's own
//! `active` flag is left untouched so re-enabling restores its choice.

pub mod domain;
pub mod service;

pub use domain::{is_visible, visible_destination, visible_destinations};
pub use service::*;
