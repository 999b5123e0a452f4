//! HTTP API handlers for leadscope-ingest

pub mod health;
pub mod ingest;
pub mod leads;
pub mod settings;

pub use health::health_routes;
pub use ingest::ingest_routes;
pub use leads::leads_routes;
pub use settings::settings_routes;
