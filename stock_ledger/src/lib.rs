pub mod auth;
pub mod cfg;
pub mod constant;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod mdw;
pub mod portfolio;
pub mod server;
pub mod stock;
pub mod svc;
pub mod user;
pub mod utils;
