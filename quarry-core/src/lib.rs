//! Quarry Core
//!
//! Core types and abstractions for submitting managed processing jobs.
//!
//! This crate contains:
//! - Domain types: Channel descriptors, job configuration, job status
//! - DTOs: The wire payload sent to the processing service
//! - Helpers for job naming and remote storage URIs
//!
//! Nothing in here performs I/O. Collaborators live in `quarry-client`,
//! orchestration lives in `quarry-processor`.

pub mod domain;
pub mod dto;
pub mod error;
pub mod naming;
pub mod uri;

pub use error::ValidationError;
