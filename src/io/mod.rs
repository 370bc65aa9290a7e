//! Types and methods for reading input and writing output.

pub mod file;

pub use file::{read_tracks, write_tracks, InputFile, OutputFile};
