// ABOUTME: Library crate for shieldquote exposing the quote wizard API for testing and embedding

#![allow(missing_docs)]

pub mod app;
pub mod components;
pub mod config;
pub mod models;
pub mod submission;
pub mod wizard;
