pub mod axis;
pub mod config;
pub mod data;
pub mod datasource;

pub use axis::*;
pub use config::*;
pub use data::*;
pub use datasource::*;
