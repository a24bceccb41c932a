//! # Mergington High School API
//!
//! A REST API built with Rust, Axum, and SQLite for viewing and signing up
//! for extracurricular activities: students register for activities with
//! capacity limits, overflow goes to a FIFO waitlist, and staff manage
//! waitlists and view an enrollment dashboard.
//!
//! ## Architecture
//!
//! The codebase follows a modular layout:
//!
//! ```text
//! src/
//! ├── config/           # Environment-driven configuration (database, CORS)
//! ├── modules/          # Feature modules
//! │   ├── activities/  # Listing, dashboard, signup/unregister state machine
//! │   ├── waitlist/    # FIFO waitlist inspection and staff removal
//! │   └── students/    # Profiles and the Role enumeration
//! └── utils/           # Shared utilities (errors)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic and transactions
//! - `model.rs`: data models and request/response DTOs
//! - `router.rs`: axum router configuration
//!
//! ## Enrollment rules
//!
//! - An activity holds at most `capacity` participants; further signups
//!   queue on a waitlist ordered by insertion.
//! - A student holds at most one of {participant, waitlist entry} per
//!   activity.
//! - Unregistering a participant promotes the earliest waitlist entry in
//!   the same transaction. Staff removal of a waitlist entry promotes
//!   nobody.
//!
//! Every operation runs as a single transaction against the shared pool;
//! it either fully commits or fully aborts.
//!
//! ## Quick start
//!
//! ```bash
//! DATABASE_URL=sqlite://activities.db cargo run
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod config;
pub mod db;
pub mod docs;
pub mod logging;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
