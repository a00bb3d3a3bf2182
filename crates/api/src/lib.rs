//! HTTP API: router, request/response mapping, service wiring.

pub mod app;
