pub mod check;
pub mod distance;
