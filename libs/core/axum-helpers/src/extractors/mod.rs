//! Custom extractors for Axum handlers.
//!
//! Both extractors route their failures through [`crate::AppError`] so
//! malformed requests get the same JSON error shape as every other failure.

pub mod json;
pub mod parsed_path;

pub use json::AppJson;
pub use parsed_path::ParsedPath;
