//! Shadershot Post-Process Pipeline
//!
//! Turns a directory of captured screenshots into cropped regions and one
//! composite collage per title, with an optional lossless webp pass over
//! the whole output tree. All image work is delegated to the external
//! ImageMagick tools; this crate only decides what to run, in which order,
//! and what to skip.

pub mod collect;
pub mod command;
pub mod pipeline;

pub use pipeline::{convert_tree_to_webp, process_title, PostProcessOptions, PostProcessStats};
