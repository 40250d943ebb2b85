//! biomechqa-web: web front-end for the biomechanics QA script.
//! Provides:
//!   - The question form (topic selector, question box, answer + references)
//!   - `POST /api/qa`, which runs the QA script for one question
//!   - Topic list, public config, and health endpoints
//!   - Configured redirects

pub mod config;
pub mod router;
pub mod handlers;
pub mod state;
