pub mod error;
pub mod vrp_api;

pub use error::ApiError;
pub use vrp_api::VrpClient;
