//! Core crate for the image studio: API client, request dispatch and the
//! application state behind the form UI.

pub mod client;
pub mod error;
pub mod gui;
pub mod models;
pub mod studio;

#[cfg(test)]
mod test_support;

pub use imagestudio_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
