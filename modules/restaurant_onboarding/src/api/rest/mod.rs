//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

pub use mapper::AssetLimits;
pub use routes::register_routes;
