pub(crate) mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod recovery;
pub mod routing;
pub mod state;
