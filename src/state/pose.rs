//! Pose labels and the selected-pose cursor
//!
//! The label list starts with the built-in poses and only ever grows,
//! one "Custom Reference N" label per successful pose-from-reference call.

use serde::Serialize;

/// Built-in pose instructions, in display order
pub const BUILT_IN_POSES: [&str; 7] = [
    "Idle Stance",
    "Profile View",
    "Walking",
    "Seated",
    "Crossed Arms",
    "Rear View",
    "Action Pose",
];

const CUSTOM_POSE_PREFIX: &str = "Custom Reference";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoseSequence {
    labels: Vec<String>,
    cursor: usize,
}

impl Default for PoseSequence {
    fn default() -> Self {
        Self {
            labels: BUILT_IN_POSES.iter().map(|s| s.to_string()).collect(),
            cursor: 0,
        }
    }
}

impl PoseSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label under which the base portrait is stored
    pub fn first_label() -> &'static str {
        BUILT_IN_POSES[0]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Label of the selected pose
    pub fn current_label(&self) -> &str {
        // cursor is kept in range by every mutator
        &self.labels[self.cursor]
    }

    /// Move the selection. Returns false when `index` is out of range.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.labels.len() {
            return false;
        }
        self.cursor = index;
        true
    }

    /// Number of custom labels appended so far
    pub fn custom_count(&self) -> usize {
        self.labels.len() - BUILT_IN_POSES.len()
    }

    /// Label the next successful pose-from-reference call will register
    ///
    /// Derived from the current length only, so a failed call never
    /// consumes a number.
    pub fn next_custom_label(&self) -> String {
        format!("{} {}", CUSTOM_POSE_PREFIX, self.custom_count() + 1)
    }

    /// Append a custom label and return its index
    pub fn push_custom(&mut self, label: String) -> usize {
        self.labels.push(label);
        self.labels.len() - 1
    }

    /// Back to the built-in labels with the first pose selected
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pose to show when stepping backwards
    ///
    /// `generated` lists the labels that already have an image on the
    /// current layer, in label order. Stepping cycles through those; when
    /// the selected pose is not among them it steps through the full list.
    /// Returns `None` when there is nothing to step to.
    pub fn previous_index(&self, generated: &[&str]) -> Option<usize> {
        if generated.len() <= 1 {
            return None;
        }
        let total = self.labels.len();
        match generated.iter().position(|l| *l == self.current_label()) {
            None => Some((self.cursor + total - 1) % total),
            Some(pos) => {
                let prev = generated[(pos + generated.len() - 1) % generated.len()];
                self.index_of(prev)
            }
        }
    }

    /// Pose to show when stepping forwards
    ///
    /// Walks the generated poses in order; past the last generated one it
    /// continues with the next label of the full list so new poses can be
    /// requested.
    pub fn next_index(&self, generated: &[&str]) -> Option<usize> {
        let total = self.labels.len();
        if total == 0 {
            return None;
        }
        let full_step = (self.cursor + 1) % total;
        match generated.iter().position(|l| *l == self.current_label()) {
            None => Some(full_step),
            Some(pos) if pos + 1 < generated.len() => self.index_of(generated[pos + 1]),
            Some(_) => Some(full_step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_built_ins() {
        let poses = PoseSequence::new();
        assert_eq!(poses.len(), 7);
        assert_eq!(poses.cursor(), 0);
        assert_eq!(poses.current_label(), "Idle Stance");
        assert_eq!(poses.custom_count(), 0);
    }

    #[test]
    fn test_custom_labels_are_numbered_from_length() {
        let mut poses = PoseSequence::new();
        assert_eq!(poses.next_custom_label(), "Custom Reference 1");
        // Asking twice does not consume a number
        assert_eq!(poses.next_custom_label(), "Custom Reference 1");

        let label = poses.next_custom_label();
        let index = poses.push_custom(label);
        assert_eq!(index, 7);
        assert_eq!(poses.next_custom_label(), "Custom Reference 2");
    }

    #[test]
    fn test_set_cursor_rejects_out_of_range() {
        let mut poses = PoseSequence::new();
        assert!(poses.set_cursor(3));
        assert!(!poses.set_cursor(7));
        assert_eq!(poses.cursor(), 3);
    }

    #[test]
    fn test_reset_drops_custom_labels() {
        let mut poses = PoseSequence::new();
        let label = poses.next_custom_label();
        let index = poses.push_custom(label);
        poses.set_cursor(index);

        poses.reset();
        assert_eq!(poses, PoseSequence::new());
    }

    #[test]
    fn test_next_walks_generated_then_full_list() {
        let mut poses = PoseSequence::new();
        let generated = ["Idle Stance", "Seated"];

        // Idle Stance -> Seated (next generated)
        assert_eq!(poses.next_index(&generated), Some(3));

        // Seated is last generated -> next label in the full list
        poses.set_cursor(3);
        assert_eq!(poses.next_index(&generated), Some(4));

        // Not generated -> full list step, wrapping
        poses.set_cursor(6);
        assert_eq!(poses.next_index(&generated), Some(0));
    }

    #[test]
    fn test_previous_cycles_generated() {
        let mut poses = PoseSequence::new();
        let generated = ["Idle Stance", "Walking", "Seated"];

        assert_eq!(poses.previous_index(&generated), Some(3));
        poses.set_cursor(3);
        assert_eq!(poses.previous_index(&generated), Some(2));

        // Selected pose not generated on this layer
        poses.set_cursor(0);
        assert_eq!(poses.previous_index(&["Walking", "Seated"]), Some(6));
    }

    #[test]
    fn test_previous_needs_two_generated_poses() {
        let poses = PoseSequence::new();
        assert_eq!(poses.previous_index(&["Idle Stance"]), None);
        assert_eq!(poses.previous_index(&[]), None);
    }
}
