use std::sync::Arc;

use tracing::debug;

use super::catalog;
use super::data::GarmentDescriptor;

/// Filter applied when browsing the wardrobe
///
/// A tag matches either the category name or the style of a garment,
/// so "Formal" and "Outerwear" are both valid tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WardrobeFilter {
    All,
    Tag(String),
}

impl WardrobeFilter {
    /// Tags offered by the wardrobe browser, in display order
    pub const TAGS: [&'static str; 14] = [
        "All",
        "Party",
        "Streetwear",
        "Vintage",
        "Instagram Filter",
        "Formal",
        "Traditional",
        "Swimwear",
        "Accessories",
        "Tops",
        "Bottoms",
        "Dresses",
        "Outerwear",
        "Custom",
    ];

    pub fn parse(tag: &str) -> Self {
        if tag == "All" {
            Self::All
        } else {
            Self::Tag(tag.to_string())
        }
    }

    pub fn matches(&self, garment: &GarmentDescriptor) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => garment.matches_tag(tag),
        }
    }
}

/// The Wardrobe holds every garment the user can pick from.
///
/// It starts from the built-in catalog and grows with uploads and
/// recolored derivatives. Nothing is ever removed during a session.
#[derive(Debug, Clone)]
pub struct Wardrobe {
    items: Vec<Arc<GarmentDescriptor>>,
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Wardrobe {
    /// Wardrobe pre-filled with the built-in catalog
    pub fn seeded() -> Self {
        Self::from_items(catalog::default_wardrobe())
    }

    pub fn from_items(items: impl IntoIterator<Item = GarmentDescriptor>) -> Self {
        Self {
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Arc<GarmentDescriptor>] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Arc<GarmentDescriptor>> {
        self.items.iter().find(|g| g.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a garment unless one with the same id exists
    ///
    /// Returns the shared descriptor held by the wardrobe, which is the
    /// existing one when the id was already registered.
    pub fn register(&mut self, garment: Arc<GarmentDescriptor>) -> Arc<GarmentDescriptor> {
        if let Some(existing) = self.get(&garment.id) {
            return Arc::clone(existing);
        }
        debug!(id = %garment.id, "registered garment");
        self.items.push(Arc::clone(&garment));
        garment
    }

    /// Like `register`, but new garments go to the front (newest first)
    pub fn register_front(&mut self, garment: Arc<GarmentDescriptor>) -> Arc<GarmentDescriptor> {
        if let Some(existing) = self.get(&garment.id) {
            return Arc::clone(existing);
        }
        debug!(id = %garment.id, "registered garment at front");
        self.items.insert(0, Arc::clone(&garment));
        garment
    }

    /// Garments matching `filter`, in wardrobe order
    ///
    /// The results borrow only the wardrobe, so a temporary filter is fine.
    pub fn filter<'a>(
        &'a self,
        filter: &WardrobeFilter,
    ) -> impl Iterator<Item = &'a Arc<GarmentDescriptor>> + 'a {
        let filter = filter.clone();
        self.items.iter().filter(move |g| filter.matches(g))
    }

    /// Back to the built-in catalog
    pub fn reset(&mut self) {
        *self = Self::seeded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Category;

    fn item(id: &str, category: Category, style: &str) -> GarmentDescriptor {
        GarmentDescriptor::new(id, id, category, format!("https://example.com/{id}.png"))
            .with_style(style)
    }

    #[test]
    fn test_register_is_idempotent_by_id() {
        let mut wardrobe = Wardrobe::from_items([item("a", Category::Tops, "Casual")]);

        let dup = Arc::new(item("a", Category::Bottoms, "Formal"));
        let kept = wardrobe.register(dup);
        assert_eq!(wardrobe.len(), 1);
        // First registration wins
        assert_eq!(kept.category, Category::Tops);

        wardrobe.register(Arc::new(item("b", Category::Tops, "Casual")));
        assert_eq!(wardrobe.len(), 2);
        assert_eq!(wardrobe.items()[1].id, "b");
    }

    #[test]
    fn test_register_front_puts_newest_first() {
        let mut wardrobe = Wardrobe::from_items([item("a", Category::Tops, "Casual")]);
        wardrobe.register_front(Arc::new(item("a-red", Category::Tops, "Casual")));
        assert_eq!(wardrobe.items()[0].id, "a-red");
        assert_eq!(wardrobe.len(), 2);
    }

    #[test]
    fn test_filter_matches_category_or_style() {
        let wardrobe = Wardrobe::from_items([
            item("coat", Category::Outerwear, "Formal"),
            item("tee", Category::Tops, "Casual"),
            item("hat", Category::Accessories, "Formal"),
        ]);

        let formal: Vec<_> = wardrobe
            .filter(&WardrobeFilter::parse("Formal"))
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(formal, vec!["coat", "hat"]);

        let tops: Vec<_> = wardrobe
            .filter(&WardrobeFilter::parse("Tops"))
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(tops, vec!["tee"]);

        assert_eq!(wardrobe.filter(&WardrobeFilter::All).count(), 3);
    }

    #[test]
    fn test_filter_results_outlive_the_filter() {
        let wardrobe = Wardrobe::seeded();
        let streetwear: Vec<&Arc<GarmentDescriptor>> = {
            let filter = WardrobeFilter::Tag("Streetwear".to_string());
            wardrobe.filter(&filter).collect()
        };
        assert!(!streetwear.is_empty());
        assert!(streetwear.iter().all(|g| g.matches_tag("Streetwear")));
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut wardrobe = Wardrobe::seeded();
        let seeded = wardrobe.len();
        wardrobe.register(Arc::new(item("custom-1", Category::Custom, "Casual")));
        wardrobe.reset();
        assert_eq!(wardrobe.len(), seeded);
        assert!(!wardrobe.contains("custom-1"));
    }
}
