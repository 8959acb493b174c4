//! Outfit and pose history engine for a generative virtual try-on studio.
//!
//! A session starts from a finalized portrait. Each applied garment becomes
//! a layer on an undoable timeline, and every layer caches the pose images
//! generated for it. Pixels come from an [`ImageGateway`]; the studio only
//! decides what to ask for and where the answer goes.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod share;
pub mod state;
pub mod studio;

pub use config::StudioConfig;
pub use error::{GatewayError, StudioError, StudioResult};
pub use gateway::{GeminiGateway, GenerationMode, ImageGateway};
pub use share::Lookbook;
pub use state::data::{Category, GarmentDescriptor, ImageRef};
pub use state::pose::PoseSequence;
pub use state::timeline::{Layer, Timeline};
pub use state::wardrobe::{Wardrobe, WardrobeFilter};
pub use studio::{generate_portrait, ApplyStart, Pending, PoseStart, Studio};
