//! Shared data structures for the studio state
//!
//! These structs represent the data model that flows between
//! the wardrobe, the outfit timeline and the image gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque handle to an image
///
/// In practice this is either a `data:` URL holding the encoded bytes or a
/// remote `http(s)` URL. Cloning is cheap: the string is shared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for inline `data:` URLs
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// True for `http://` and `https://` references
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Inline payloads can be megabytes long
        if self.is_inline() && self.0.len() > 64 {
            write!(f, "{}...({} bytes)", self.0.get(..32).unwrap_or(&self.0), self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Wardrobe category of a garment
///
/// The category decides which instruction the try-on request uses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Accessories,
    Traditional,
    Swimwear,
    Suits,
    Custom,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Tops,
        Category::Bottoms,
        Category::Dresses,
        Category::Outerwear,
        Category::Accessories,
        Category::Traditional,
        Category::Swimwear,
        Category::Suits,
        Category::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tops => "Tops",
            Category::Bottoms => "Bottoms",
            Category::Dresses => "Dresses",
            Category::Outerwear => "Outerwear",
            Category::Accessories => "Accessories",
            Category::Traditional => "Traditional",
            Category::Swimwear => "Swimwear",
            Category::Suits => "Suits",
            Category::Custom => "Custom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A garment in the wardrobe
///
/// Descriptors are immutable once created. Timeline layers share them
/// through `Arc` and never copy them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GarmentDescriptor {
    /// Unique id (e.g., "adat-batik-pria")
    pub id: String,
    /// Display name
    pub name: String,
    pub category: Category,
    /// Free-form style tag (e.g., "Formal", "Streetwear")
    pub style: Option<String>,
    /// Product shot of the garment
    pub image: ImageRef,
    /// Optional 3D model (.glb/.gltf) of the garment
    pub model3d: Option<ImageRef>,
}

impl GarmentDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        image: impl Into<ImageRef>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            style: None,
            image: image.into(),
            model3d: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_model3d(mut self, model: impl Into<ImageRef>) -> Self {
        self.model3d = Some(model.into());
        self
    }

    /// Describe a garment the user uploaded from disk or camera
    pub fn custom_upload(name: impl Into<String>, image: ImageRef, at: DateTime<Utc>) -> Self {
        Self::new(
            format!("custom-{}", at.timestamp_millis()),
            name,
            Category::Custom,
            image,
        )
        .with_style("Casual")
    }

    /// Derive the descriptor of a recolored copy
    ///
    /// The original is left untouched. The new id is
    /// `{originalId}-{color}-{timestamp}` so it never collides with history.
    pub fn recolored(&self, color: &str, image: ImageRef, at: DateTime<Utc>) -> Self {
        Self {
            id: format!(
                "{}-{}-{}",
                self.id,
                color.to_lowercase(),
                at.timestamp_millis()
            ),
            name: format!("{} ({})", self.name, color),
            category: self.category,
            style: self.style.clone(),
            image,
            model3d: self.model3d.clone(),
        }
    }

    /// Whether this garment matches a category-or-style tag
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.category.as_str() == tag || self.style.as_deref() == Some(tag)
    }
}
