pub mod api;
pub mod error;
pub mod models;
pub mod network;
pub mod observability;
pub mod screens;
pub mod settings;
pub mod storage;
