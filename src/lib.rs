pub mod app;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod constants;
pub mod extractors;
pub mod logging;
pub mod quiz;
pub mod reminder;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
pub mod stats;
pub mod store;
