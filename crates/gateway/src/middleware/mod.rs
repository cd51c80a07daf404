//! Gateway middleware

pub mod error_body;
