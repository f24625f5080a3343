//! Core domain types
//!
//! This module contains the structures a caller builds to describe a
//! processing job (configuration, input and output channels) and the
//! structures the processing service reports back (status, logs).

pub mod channel;
pub mod config;
pub mod job;
pub mod log;
pub mod storage;
