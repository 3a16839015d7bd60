pub mod error;
pub mod logging;
pub mod order;
pub mod report;
pub mod settings;
