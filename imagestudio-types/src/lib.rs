//! Shared wire types for the image studio's remote generative-image API.

mod base64_serde;

pub mod config;
pub mod content;
pub mod enums;
pub mod models;
pub mod response;
