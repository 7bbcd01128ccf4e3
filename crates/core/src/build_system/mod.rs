//! Cargo project layout: manifests, target classification and the Makefile
//! escape hatch.

pub mod classifier;
pub mod makefile;
pub mod manifest;

pub use classifier::CrateRoleClassifier;
pub use makefile::{Makefile, find_makefile};
pub use manifest::{MANIFEST_FILE, Manifest, TargetEntry, find_manifest, load_nearest, parse_manifest};
