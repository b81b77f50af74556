pub mod alerts;
pub mod config;
pub mod cycle;
pub mod fetch;
pub mod notify;
pub mod state;
