//! Query parameter shapes, result views and errors.

pub mod errors;
pub mod params;
pub mod views;

pub use errors::QueryError;
pub use params::*;
pub use views::*;
