//! Shared helpers for geepr-axum integration tests.

pub mod app;
