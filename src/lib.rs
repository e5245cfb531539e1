// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Satellite constellation visualization engine with ground-swath
//! projections and point-coverage (revisit time) queries.
//!
//! The crate drives a 3D globe through the [`scene::SceneInterface`]
//! capability trait: it loads a day of satellite trajectories from a backend,
//! turns each one into a moving marker, an orbit line and two ground swaths,
//! and keeps their visibility consistent with the user's focus and toggles.
//!
//! # Key entry points
//!
//! - [`engine::SatVizEngine`] - owns all interactive state
//! - [`engine::SatVizCommand`] - the complete set of user operations
//! - [`options::Options`] - runtime configuration (display, colors, camera,
//!   playback), loadable from TOML presets
//! - [`options::SessionConfig`] - injected access token, initial time, model
//!   and backend
//! - [`scene::MemoryScene`] - an in-memory scene for headless use and tests
//!
//! # Architecture
//!
//! All state is mutated on the caller's thread. Trajectory loads and
//! coverage queries run on a background [`net::RequestProcessor`] thread;
//! the engine applies their completions in [`engine::SatVizEngine::poll`],
//! discarding any that belong to a superseded request.

pub mod clock;
pub mod coverage;
pub mod data;
pub mod engine;
pub mod entity;
pub mod error;
pub mod geo;
pub mod net;
pub mod options;
pub mod scene;
pub mod view;
