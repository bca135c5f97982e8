//! Input validation utilities

use crate::constants::{MAX_SOURCE_CODE_BYTES, languages};

/// Validate source code before it leaves the editor
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Please enter code before submitting.");
    }
    if code.len() > MAX_SOURCE_CODE_BYTES {
        return Err("Source code exceeds maximum size of 64KB");
    }
    Ok(())
}

/// Validate a programming language identifier
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if languages::ALL.contains(&language) {
        Ok(())
    } else {
        Err("Unsupported programming language")
    }
}
