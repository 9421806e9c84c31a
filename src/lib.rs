// Photos Export - Photo library export tool
// Copyright (c) 2025 Photos Export Contributors
// Licensed under the MIT License

//! # Photos Export
//!
//! Copies every asset of a photo library into a `YYYY/MM` directory tree,
//! naming each file after its capture time so that repeated exports land on
//! the same names.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Enumerating** assets captured within a year range
//! - **Naming** resources deterministically, with collision-free suffixes
//! - **Writing** resources with overwrite or incremental semantics
//! - **Recording** failures in an append-only error ledger
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (naming, resource pipeline, coordination)
//! - [`adapters`] - Library, writer, file system and content type integrations
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and the error ledger
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photos_export::config::ExporterConfig;
//! use photos_export::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExporterConfig::from_file("photos-export.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::from_config(&config, shutdown_rx).await?;
//!
//!     let summary = coordinator.execute_export().await?;
//!     println!("{}", summary.completion_message());
//!     Ok(())
//! }
//! ```
//!
//! ## Filenames
//!
//! A resource is named after the capture stamp `YYYYMMDDHHMMSS` plus the
//! extension of its original file. When that name is taken within the
//! asset's folder, a letter derived from a hash of the resource identity is
//! appended, so the same library exports to the same names every time:
//!
//! ```rust
//! use photos_export::adapters::ContentTypeTable;
//! use photos_export::core::naming::{FilenameAssigner, NameRegistry};
//! use photos_export::core::timestamp::CaptureStamp;
//! use chrono::{TimeZone, Utc};
//!
//! let stamp = CaptureStamp::from_datetime(&Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
//! let lookup = ContentTypeTable::new();
//! let assigner = FilenameAssigner::new(&lookup);
//! let mut registry = NameRegistry::new();
//!
//! let first = assigner.assign(&stamp, "IMG_0001.HEIC", "seed-1", "public.heic", &mut registry);
//! let second = assigner.assign(&stamp, "IMG_0001.MOV", "seed-2", "com.apple.quicktime-movie", &mut registry);
//! assert_eq!(first, "20250102030405.heic");
//! assert_eq!(second, "20250102030405.mov");
//! ```
//!
//! ## Error Handling
//!
//! The [`domain::ExporterError`] type is used for all errors:
//!
//! ```rust,no_run
//! use photos_export::domain::ExporterError;
//!
//! fn example() -> Result<(), ExporterError> {
//!     let config = photos_export::config::ExporterConfig::from_file("photos-export.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
