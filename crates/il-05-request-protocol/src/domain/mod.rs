//! Domain rules of the request protocol.

pub mod gate;
pub mod validation;

pub use gate::require_gating_request;
pub use validation::{build_data_requests, check_idp_list, checked_minimum};
