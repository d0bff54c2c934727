//! Trivia Types - Pure type definitions for the trivia API
//!
//! This crate contains only plain data types with no async runtime or
//! database dependencies, shared between the server and its tests.

pub mod category;
pub mod question;

pub use category::*;
pub use question::*;
