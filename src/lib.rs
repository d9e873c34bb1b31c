pub mod config;
pub mod dto;
pub mod error;
pub mod ids;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
