pub mod auth_service;
pub mod entity_store;
pub mod persistence;
pub mod scheduling;
pub mod seed;
pub mod stats_service;
