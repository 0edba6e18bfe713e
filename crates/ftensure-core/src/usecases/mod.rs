//! Use cases (interactors) for filetracker-ensure
//!
//! This module contains the application use cases that orchestrate
//! domain values and port interfaces. Use cases are thin coordinators
//! that delegate validation to domain types and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`AvailabilityProber`] - Liveness gate with bounded, fixed-delay retry
//! - [`EnsureFileUseCase`] - Existence/digest comparison and conditional upload
//! - [`run_ensure`] - One full run: probe, then decide and transfer

pub mod ensure_file;
pub mod probe_availability;
pub mod run;


pub use ensure_file::EnsureFileUseCase;
pub use probe_availability::AvailabilityProber;
pub use run::{run_ensure, EnsureRequest};
