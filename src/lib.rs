// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
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
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test modules unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Camera framing and dolly-zoom control for streamed 3D tile viewers.
//!
//! Tileframe keeps a perspective and an orthographic camera in lockstep,
//! zooms with a step proportional to the distance from the scene, and
//! frames freshly loaded content from its bounding sphere.
//!
//! # Key entry points
//!
//! - [`session::Session`] - the per-viewer context object running the frame
//!   pipeline
//! - [`tiles::TileStreamProvider`] - the seam to a level-of-detail tile
//!   streamer
//! - [`scene::SceneRenderer`] - the seam to whatever draws the scene graph
//! - [`options::Options`] - runtime configuration (zoom law, framing,
//!   controls, tile tuning)
//!
//! # Architecture
//!
//! Tile providers emit [`tiles::TileEvent`]s from any thread through an
//! mpsc channel. Each frame [`session::Session::tick`] drains those events,
//! applies orbit damping, resolves projection toggles, mirrors the live
//! camera into the other one and finally hands the camera to the provider.
//! [`session::Session::render`] then draws.

pub mod camera;
pub mod error;
#[cfg(feature = "viewer")]
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod session;
pub mod tiles;
#[cfg(feature = "viewer")]
mod viewer;

pub use camera::{CameraKind, CameraRig, CameraView, Resolution};
pub use error::TilesError;
pub use input::{InputEvent, KeyAction, MouseButton};
pub use options::Options;
pub use scene::SceneRenderer;
pub use session::{Command, Frame, Session};
pub use tiles::{BoundingSphere, TileEvent, TileStreamProvider};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
