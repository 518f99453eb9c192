//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain services.
//!
//! Requests arrive as JSON bodies or query strings, are passed to the domain
//! services held in [`crate::AppState`], and the results are converted to the
//! `shared` DTOs by the mappers in [`rest::mappers`].
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum, one router per resource merged under `/api`
//! - **Serialization**: Serde JSON, with money as JSON numbers
//! - **Error Translation**: [`rest::error_response`] maps each `TrackerError`
//!   variant onto a status code and a `{ "error": ... }` body

pub mod rest;
