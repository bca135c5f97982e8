//! CodeQuest client - Submission and test-run orchestration
//!
//! This library is the client-side core of the CodeQuest coding-challenge
//! platform: it coordinates optimistic submission updates, one-in-flight
//! request semantics, polling against an external asynchronous judge, and
//! background dashboard refreshes. Rendering is delegated to a thin view
//! layer behind the traits in [`view`], so the core runs and tests without
//! a DOM.
//!
//! # Architecture
//!
//! The crate follows a layered architecture:
//! - **Controllers**: per-operation orchestration ([`submission`], [`runner`], [`live`])
//! - **Clients**: thin typed access to the backend and judge ([`backend`], [`judge`])
//! - **Primitives**: generic polling ([`poll`]), shared session state ([`session`])
//! - **Models**: domain models and wire payloads ([`models`])

pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod judge;
pub mod live;
pub mod models;
pub mod poll;
pub mod runner;
pub mod session;
pub mod submission;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use session::ChallengeSession;
