//! Astra - the ASTRA.IO landing page
//!
//! A floating, distorted octahedron rendered with wgpu, the static page that
//! frames it, and the small HTTP backend that serves the built client.

pub mod camera;
pub mod error;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod shell;
pub mod viewer;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(target_arch = "wasm32")]
mod web;

pub use error::{Error, Result};
