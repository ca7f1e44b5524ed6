pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod resolve;
pub mod summary;
pub mod table;
pub mod taxonomy;

pub use error::CensusError;
