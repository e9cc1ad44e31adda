//! # Utility Modules
//!
//! Supporting utilities for the serialization engine.
//!
//! ## Components
//! - **Logging**: structured logging configuration via `tracing-subscriber`

pub mod logging;
