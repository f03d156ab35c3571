pub mod app;
pub mod config;
pub mod extract;
pub mod paths;
pub mod payload;
pub mod report;
pub mod store;
pub mod workdir;
