//! Shadershot Profile Model
//!
//! Validated inputs for a batch run: game profiles from the gamelist file
//! and the ordered shader list. Everything here is loaded and checked once
//! before the first external process runs; the rest of the workspace treats
//! these values as immutable.

pub mod gamelist;
pub mod profile;
pub mod shaderlist;

pub use gamelist::load_gamelist;
pub use profile::{GameProfile, ProfileDefaults};
pub use shaderlist::load_shaderlist;
