//! Outfit history
//!
//! A linear undo stack of layers. Layer 0 is the bare portrait; every later
//! layer is one garment applied on top of the layer before it. The cursor
//! marks the outfit currently shown, so `layers[0..=cursor]` is what the
//! person is wearing. Layers past the cursor are kept for redo until a new
//! garment is applied, which cuts them off.

use std::collections::HashMap;
use std::sync::Arc;

use super::data::{GarmentDescriptor, ImageRef};
use super::pose::PoseSequence;

/// One garment-application step and the pose images generated for it
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    garment: Option<Arc<GarmentDescriptor>>,
    /// Pose the layer was generated at; its image is the canonical base
    origin_pose: String,
    pose_images: HashMap<String, ImageRef>,
}

impl Layer {
    /// The garment-less bottom layer holding the finalized portrait
    pub fn base(pose: impl Into<String>, image: ImageRef) -> Self {
        Self::with_garment(None, pose.into(), image)
    }

    pub fn dressed(garment: Arc<GarmentDescriptor>, pose: impl Into<String>, image: ImageRef) -> Self {
        Self::with_garment(Some(garment), pose.into(), image)
    }

    fn with_garment(garment: Option<Arc<GarmentDescriptor>>, pose: String, image: ImageRef) -> Self {
        let mut pose_images = HashMap::new();
        pose_images.insert(pose.clone(), image);
        Self {
            garment,
            origin_pose: pose,
            pose_images,
        }
    }

    pub fn garment(&self) -> Option<&Arc<GarmentDescriptor>> {
        self.garment.as_ref()
    }

    pub fn garment_id(&self) -> Option<&str> {
        self.garment.as_ref().map(|g| g.id.as_str())
    }

    pub fn origin_pose(&self) -> &str {
        &self.origin_pose
    }

    pub fn pose_image(&self, label: &str) -> Option<&ImageRef> {
        self.pose_images.get(label)
    }

    pub fn has_pose(&self, label: &str) -> bool {
        self.pose_images.contains_key(label)
    }

    pub fn pose_count(&self) -> usize {
        self.pose_images.len()
    }

    /// Source image for further pose transformations of this layer
    pub fn canonical_image(&self) -> &ImageRef {
        // origin_pose is inserted at construction and never removed
        &self.pose_images[&self.origin_pose]
    }

    /// Store a generated pose image, replacing any previous one
    pub fn insert_pose_image(&mut self, label: impl Into<String>, image: ImageRef) {
        self.pose_images.insert(label.into(), image);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    layers: Vec<Layer>,
    cursor: usize,
}

impl Timeline {
    /// Empty timeline (no session yet)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn current_layer(&self) -> Option<&Layer> {
        self.layers.get(self.cursor)
    }

    pub fn current_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.cursor)
    }

    /// Start over from a finalized portrait
    pub fn reset(&mut self, pose: &str, portrait: ImageRef) {
        self.layers = vec![Layer::base(pose, portrait)];
        self.cursor = 0;
    }

    /// Drop everything (session ended)
    pub fn clear(&mut self) {
        self.layers.clear();
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.layers.is_empty() && self.cursor < self.layers.len() - 1
    }

    /// Step one layer back. Returns false when already at the portrait.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step one layer forward. Returns false when nothing is left to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Whether the layer right after the cursor wears `garment_id`
    ///
    /// This is the redo fast path: re-applying a garment that was just
    /// undone restores the stored layer instead of generating it again.
    pub fn next_layer_wears(&self, garment_id: &str) -> bool {
        self.layers
            .get(self.cursor + 1)
            .and_then(Layer::garment_id)
            .is_some_and(|id| id == garment_id)
    }

    /// Put a new layer on top of the current one
    ///
    /// Layers past the cursor are discarded first; the redo history they
    /// held is gone for good. Returns the new cursor.
    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.push_layer_after(self.cursor, layer)
    }

    /// Put a new layer on top of layer `base`, wherever the cursor is now
    ///
    /// Used when a generation finishes after the user moved through
    /// history: the result belongs on the layer it was generated from.
    pub fn push_layer_after(&mut self, base: usize, layer: Layer) -> usize {
        self.layers.truncate(base.saturating_add(1));
        self.layers.push(layer);
        self.cursor = self.layers.len() - 1;
        self.cursor
    }

    /// Layers making up the outfit on display
    pub fn active_layers(&self) -> &[Layer] {
        if self.layers.is_empty() {
            return &[];
        }
        &self.layers[..=self.cursor]
    }

    /// Garments worn in the outfit on display, bottom first
    pub fn active_garments(&self) -> Vec<Arc<GarmentDescriptor>> {
        self.active_layers()
            .iter()
            .filter_map(|layer| layer.garment().cloned())
            .collect()
    }

    pub fn is_worn(&self, garment_id: &str) -> bool {
        self.active_layers()
            .iter()
            .any(|layer| layer.garment_id() == Some(garment_id))
    }

    /// Image to display for the selected pose
    ///
    /// Falls back to the layer's canonical image when the selected pose has
    /// not been generated for it, so a layer never renders blank.
    pub fn resolve_display_image(&self, poses: &PoseSequence) -> Option<&ImageRef> {
        let layer = self.current_layer()?;
        layer
            .pose_image(poses.current_label())
            .or_else(|| Some(layer.canonical_image()))
    }

    /// Labels generated for the current layer, in pose-sequence order
    pub fn active_pose_keys<'a>(&self, poses: &'a PoseSequence) -> Vec<&'a str> {
        let Some(layer) = self.current_layer() else {
            return Vec::new();
        };
        poses
            .labels()
            .iter()
            .map(String::as_str)
            .filter(|label| layer.has_pose(label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Category;

    fn garment(id: &str) -> Arc<GarmentDescriptor> {
        Arc::new(GarmentDescriptor::new(
            id,
            id,
            Category::Tops,
            format!("https://example.com/{id}.png"),
        ))
    }

    fn img(name: &str) -> ImageRef {
        ImageRef::from(format!("data:image/png;base64,{name}"))
    }

    fn stacked(ids: &[&str]) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.reset("Idle Stance", img("base"));
        for id in ids {
            timeline.push_layer(Layer::dressed(garment(id), "Idle Stance", img(id)));
        }
        timeline
    }

    #[test]
    fn test_reset_seeds_base_layer() {
        let timeline = stacked(&[]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.cursor(), 0);
        let base = timeline.current_layer().unwrap();
        assert!(base.garment().is_none());
        assert_eq!(base.pose_count(), 1);
        assert_eq!(base.pose_image("Idle Stance"), Some(&img("base")));
    }

    #[test]
    fn test_undo_redo_bounds() {
        let mut timeline = stacked(&["a"]);
        assert!(!timeline.redo());
        assert!(timeline.undo());
        assert!(!timeline.undo());
        assert_eq!(timeline.cursor(), 0);
        assert!(timeline.redo());
        assert_eq!(timeline.cursor(), 1);
    }

    #[test]
    fn test_empty_timeline_has_no_moves() {
        let mut timeline = Timeline::new();
        assert!(!timeline.can_undo());
        assert!(!timeline.can_redo());
        assert!(!timeline.undo());
        assert!(!timeline.redo());
        assert!(timeline.active_layers().is_empty());
        assert!(timeline.resolve_display_image(&PoseSequence::new()).is_none());
    }

    #[test]
    fn test_push_truncates_redo_history() {
        let mut timeline = stacked(&["a", "b", "c"]);
        timeline.undo();
        timeline.undo();
        assert_eq!(timeline.cursor(), 1);

        let cursor = timeline.push_layer(Layer::dressed(garment("x"), "Idle Stance", img("x")));
        assert_eq!(cursor, 2);
        let ids: Vec<_> = timeline.layers().iter().map(Layer::garment_id).collect();
        assert_eq!(ids, vec![None, Some("a"), Some("x")]);
    }

    #[test]
    fn test_push_after_issuing_layer() {
        let mut timeline = stacked(&["a", "b"]);
        // generation was issued at layer 2, then the user undid twice
        timeline.undo();
        timeline.undo();

        let cursor = timeline.push_layer_after(2, Layer::dressed(garment("c"), "Idle Stance", img("c")));
        assert_eq!(cursor, 3);
        let ids: Vec<_> = timeline.layers().iter().map(Layer::garment_id).collect();
        assert_eq!(ids, vec![None, Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_next_layer_wears() {
        let mut timeline = stacked(&["a", "b"]);
        assert!(!timeline.next_layer_wears("b"));
        timeline.undo();
        assert!(timeline.next_layer_wears("b"));
        assert!(!timeline.next_layer_wears("a"));
    }

    #[test]
    fn test_active_garments_follow_cursor() {
        let mut timeline = stacked(&["a", "b"]);
        timeline.undo();
        let ids: Vec<_> = timeline.active_garments().iter().map(|g| g.id.clone()).collect();
        assert_eq!(ids, vec!["a".to_string()]);
        assert!(timeline.is_worn("a"));
        assert!(!timeline.is_worn("b"));
    }

    #[test]
    fn test_display_falls_back_to_canonical_image() {
        let mut timeline = Timeline::new();
        timeline.reset("Seated", img("seated"));
        let mut poses = PoseSequence::new();
        poses.set_cursor(poses.index_of("Walking").unwrap());

        assert_eq!(timeline.resolve_display_image(&poses), Some(&img("seated")));
    }

    #[test]
    fn test_active_pose_keys_use_sequence_order() {
        let mut timeline = stacked(&[]);
        let layer = timeline.current_layer_mut().unwrap();
        layer.insert_pose_image("Rear View", img("rear"));
        layer.insert_pose_image("Walking", img("walk"));

        let poses = PoseSequence::new();
        assert_eq!(
            timeline.active_pose_keys(&poses),
            vec!["Idle Stance", "Walking", "Rear View"]
        );
    }

    #[test]
    fn test_canonical_image_is_origin_pose() {
        let mut layer = Layer::dressed(garment("a"), "Walking", img("walk"));
        layer.insert_pose_image("Idle Stance", img("idle"));
        assert_eq!(layer.origin_pose(), "Walking");
        assert_eq!(layer.canonical_image(), &img("walk"));
    }
}
