//! Provider service implementations.

pub mod anthropic_service;
