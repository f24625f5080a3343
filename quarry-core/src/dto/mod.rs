//! Data Transfer Objects for the processing service
//!
//! These structures mirror the service's wire schema field for field.
//! Optional fields are either omitted or sent as explicit `null` exactly the
//! way the service expects; see the individual field attributes.

pub mod processing;
