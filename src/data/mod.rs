//! Input loading for adjacency frames

pub mod frames;

pub use frames::{load_frames, parse_frames, Frame};
