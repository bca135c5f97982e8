//! Shared utilities

pub mod escape;
pub mod time;
pub mod validation;

pub use escape::escape_html;
