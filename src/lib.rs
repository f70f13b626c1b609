pub mod config;
pub mod error;
pub mod reschedule;
#[cfg(feature = "web-interface")]
pub mod server;
pub mod shutdown;
pub mod startup;
pub mod utils;
pub mod working_hours;
