/// Image generation gateway
///
/// This module handles every pixel-producing request:
/// - The gateway trait the studio talks to (this file)
/// - Instruction text per request kind (prompt.rs)
/// - Inline image payloads and upload validation (inline.rs)
/// - The Gemini REST implementation (gemini.rs)

pub mod gemini;
pub mod inline;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StudioResult;
use crate::state::data::{Category, ImageRef};

pub use gemini::GeminiGateway;
pub use inline::InlineImage;

/// Who is in the uploaded photo, which decides the portrait instruction
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// One person, rendered as a full-body fashion model
    Personal,
    /// Two people, keeping their interaction
    Couple,
    /// A group portrait
    #[default]
    Family,
    /// One person, plus a generated partner next to them
    Dreammate,
}

/// The external generative-image service
///
/// Every call takes image references plus parameters and returns a new
/// image reference. Failures carry no partial result; callers leave their
/// state untouched when a call fails.
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Turn an uploaded photo into a studio portrait
    async fn generate_portrait(
        &self,
        photo: &ImageRef,
        mode: GenerationMode,
    ) -> StudioResult<ImageRef>;

    /// Dress the person in `person` with the garment in `garment`
    async fn apply_garment(
        &self,
        person: &ImageRef,
        garment: &ImageRef,
        category: Category,
    ) -> StudioResult<ImageRef>;

    /// Re-shoot `base` in the named pose
    async fn change_pose(&self, base: &ImageRef, pose: &str) -> StudioResult<ImageRef>;

    /// Re-shoot `base` copying the pose of the person in `reference`
    async fn pose_from_reference(
        &self,
        base: &ImageRef,
        reference: &ImageRef,
    ) -> StudioResult<ImageRef>;

    /// Produce a colorway of a garment product shot
    async fn recolor(&self, garment: &ImageRef, color: &str) -> StudioResult<ImageRef>;
}
