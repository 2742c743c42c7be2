//! Fortnite Festival jam track data: fetching, caching and search.

pub mod client;
pub mod model;
pub mod search;

pub use client::{TrackSnapshot, TracksClient};
pub use model::{parse_tracks, Difficulties, Track};
pub use search::{normalize, search};
