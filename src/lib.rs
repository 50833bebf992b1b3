pub mod assignment;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::{Result, RouterError};
