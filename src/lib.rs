pub mod counter;
pub mod error;
pub mod forward;
pub mod logging;
pub mod server;
