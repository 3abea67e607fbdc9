pub mod client;
mod error;
mod farms;
mod ndvi;
pub mod types;
mod users;

pub use client::*;
pub use error::ApiError;
pub use farms::farm_path;
pub use types::*;
