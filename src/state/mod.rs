/// State management module
///
/// This module holds all in-memory session state:
/// - Shared data structures (data.rs)
/// - Pose labels and the selected pose (pose.rs)
/// - Outfit history with undo/redo (timeline.rs)
/// - The garment catalog (wardrobe.rs, catalog.rs)

pub mod catalog;
pub mod data;
pub mod pose;
pub mod timeline;
pub mod wardrobe;
