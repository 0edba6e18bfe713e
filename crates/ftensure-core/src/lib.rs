//! filetracker-ensure core - Domain logic for the sync guard
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `RemoteEndpoint`, `RemotePath`, `ContentDigest`, `SyncOutcome`
//! - **Use cases** - `AvailabilityProber`, `EnsureFileUseCase` and the composed [`run_ensure`]
//! - **Port definitions** - Traits for adapters: `IFileStore`, `ILocalFileSource`
//! - **Configuration** - `EnsureConfig` with builder and validation
//!
//! # Architecture
//!
//! The domain module holds pure validation logic with no I/O.
//! Ports define trait interfaces that adapter crates implement
//! (`ftensure-client` for the remote service, `ftensure-fs` for local files).
//! Use cases orchestrate domain values through port interfaces.
//!
//! [`run_ensure`]: usecases::run_ensure

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
