//! Progress rendering for streaming replies

pub mod reporter;
