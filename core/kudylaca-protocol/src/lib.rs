#![no_std] // Shared with the WASM platform

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod alphabet;
pub mod affixes;

// Re-export core types for convenience
pub use affixes::{Modality, ModalityFlags, PosSuffix, Prefix, TimePrefix};

pub mod model;
pub use model::*;
