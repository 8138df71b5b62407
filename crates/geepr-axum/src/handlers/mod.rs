//! HTTP handlers, one module per resource.
//!
//! Handlers validate input, call one repository operation and shape the
//! response. They hold no catalog logic of their own.

pub mod games;
pub mod platforms;
pub mod release_platforms;
pub mod releases;
