pub mod analysis_export;
pub mod analysis_store;
pub mod config;
pub mod db;
pub mod match_cache;
pub mod metrics;
pub mod pipeline;
pub mod raw_cache;
pub mod registry;
pub mod report;
pub mod riot_api;
pub mod riot_types;
