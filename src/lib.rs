pub mod agronomy;
pub mod config;
pub mod decision;
pub mod economics;
pub mod error;
pub mod funding;
pub mod output;
pub mod pipeline;
pub mod reference;
pub mod server;
