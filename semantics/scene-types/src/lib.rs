//! Classified mesh fragment types for scene semantics.
//!
//! This crate provides the passive data types that a scene reconstruction
//! produces and that spatial queries read:
//!
//! - [`Classification`] - Closed set of semantic surface labels
//! - [`LabelColor`] - Display color associated with a classification
//! - [`ClassifiedFace`] - A face centroid in fragment-local space plus its label
//! - [`MeshFragment`] - A piece of reconstructed surface with its own
//!   local-to-world transform
//! - [`FragmentId`] - Stable identity of a fragment across updates
//! - [`Triangle`] - A concrete triangle, used to derive face centroids
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - AR front ends (through FFI)
//! - CLI tools and replay utilities
//! - Servers
//!
//! # Units
//!
//! All coordinates are `f64`. The query defaults in `scene-query` assume meters.
//!
//! # Example
//!
//! ```
//! use scene_types::{Classification, ClassifiedFace, FragmentId, MeshFragment, Point3};
//! use nalgebra::{Matrix4, Vector3};
//!
//! let transform = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0));
//! let fragment = MeshFragment::new(FragmentId::new(7), transform)
//!     .with_faces(vec![ClassifiedFace::new(Point3::origin(), Classification::Wall)]);
//!
//! assert_eq!(fragment.face_count(), 1);
//! assert_eq!(fragment.origin(), Point3::new(1.0, 0.0, 0.0));
//! assert_eq!(fragment.face_world_position(0), Some(Point3::new(1.0, 0.0, 0.0)));
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod classification;
mod color;
mod fragment;
mod triangle;

// Re-export core types
pub use classification::{Classification, ParseClassificationError};
pub use color::LabelColor;
pub use fragment::{ClassifiedFace, FragmentId, MeshFragment};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
