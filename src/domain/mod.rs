pub mod response;
pub mod types;
pub mod validation;
