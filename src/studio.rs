//! Studio session orchestration
//!
//! `Studio` owns all session state and routes user intents to the outfit
//! timeline and the image gateway. Generation requests follow a two-step
//! protocol so a UI can keep rendering while a request is in flight:
//!
//! 1. `begin_*` checks preconditions, marks the studio busy (and moves the
//!    pose cursor optimistically where that applies) and hands back a job.
//! 2. The job runs against an [`ImageGateway`] without borrowing the studio.
//! 3. `complete_*` commits the result or rolls back, and always clears busy.
//!
//! The `async` methods (`apply_garment`, `select_pose`, ...) chain the three
//! steps for callers that do not need to observe the in-flight state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{StudioError, StudioResult};
use crate::gateway::inline::image_ref_from_upload;
use crate::gateway::{GenerationMode, ImageGateway};
use crate::share::Lookbook;
use crate::state::data::{GarmentDescriptor, ImageRef};
use crate::state::pose::PoseSequence;
use crate::state::timeline::{Layer, Timeline};
use crate::state::wardrobe::{Wardrobe, WardrobeFilter};

const APPLY_CONTEXT: &str = "Failed to apply garment";
const POSE_CONTEXT: &str = "Failed to change pose";
const CUSTOM_POSE_CONTEXT: &str = "Failed to copy reference pose";
const RECOLOR_CONTEXT: &str = "Failed to recolor garment";

/// Kind of generation request currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    ApplyGarment,
    PoseChange,
    CustomPose,
    Recolor,
}

/// Try-on request waiting for the gateway
#[derive(Debug, Clone)]
pub struct GarmentJob {
    session: u64,
    /// Layer the new garment goes on top of
    base_layer: usize,
    pose_label: String,
    pub garment: Arc<GarmentDescriptor>,
    pub person: ImageRef,
}

impl GarmentJob {
    pub async fn run(&self, gateway: &dyn ImageGateway) -> StudioResult<ImageRef> {
        gateway
            .apply_garment(&self.person, &self.garment.image, self.garment.category)
            .await
    }
}

/// Pose-change request waiting for the gateway
#[derive(Debug, Clone)]
pub struct PoseJob {
    session: u64,
    layer: usize,
    pose_index: usize,
    previous_pose: usize,
    pub label: String,
    pub base: ImageRef,
}

impl PoseJob {
    pub async fn run(&self, gateway: &dyn ImageGateway) -> StudioResult<ImageRef> {
        gateway.change_pose(&self.base, &self.label).await
    }
}

/// Pose-from-reference request waiting for the gateway
#[derive(Debug, Clone)]
pub struct CustomPoseJob {
    session: u64,
    layer: usize,
    pub label: String,
    pub base: ImageRef,
    pub reference: ImageRef,
}

impl CustomPoseJob {
    pub async fn run(&self, gateway: &dyn ImageGateway) -> StudioResult<ImageRef> {
        gateway.pose_from_reference(&self.base, &self.reference).await
    }
}

/// Recolor request waiting for the gateway
///
/// Also carries the try-on inputs taken when the recolor was requested, so
/// the colorway is put on the look that was on display at that moment.
#[derive(Debug, Clone)]
pub struct RecolorJob {
    session: u64,
    base_layer: usize,
    pose_label: String,
    pub item: Arc<GarmentDescriptor>,
    pub color: String,
    pub person: ImageRef,
}

impl RecolorJob {
    pub async fn run(&self, gateway: &dyn ImageGateway) -> StudioResult<ImageRef> {
        gateway.recolor(&self.item.image, &self.color).await
    }
}

/// Result of starting a garment application
#[derive(Debug)]
pub enum ApplyStart {
    /// The garment was the next layer in redo history and is shown again
    Restored,
    Generate(GarmentJob),
}

/// Result of starting a pose selection
#[derive(Debug)]
pub enum PoseStart {
    /// The pose was already selected
    Unchanged,
    /// The layer already had an image for the pose
    Cached,
    Generate(PoseJob),
}

/// One studio session and everything it displays
#[derive(Debug)]
pub struct Studio {
    /// Finalized portrait, kept for display before the timeline is seeded
    portrait: Option<ImageRef>,
    timeline: Timeline,
    poses: PoseSequence,
    wardrobe: Wardrobe,
    /// Bumped on every start/end so late results from an old session are dropped
    session: u64,
    pending: Option<Pending>,
    loading_message: Option<String>,
    last_error: Option<String>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    pub fn new() -> Self {
        Self::with_wardrobe(Wardrobe::seeded())
    }

    pub fn with_wardrobe(wardrobe: Wardrobe) -> Self {
        Self {
            portrait: None,
            timeline: Timeline::new(),
            poses: PoseSequence::new(),
            wardrobe,
            session: 0,
            pending: None,
            loading_message: None,
            last_error: None,
        }
    }

    // ========== Accessors ==========

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn poses(&self) -> &PoseSequence {
        &self.poses
    }

    pub fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    pub fn has_session(&self) -> bool {
        !self.timeline.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn loading_message(&self) -> Option<&str> {
        self.loading_message.as_deref()
    }

    /// Human-readable message of the last failed operation
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Image to show in the viewport
    pub fn display_image(&self) -> Option<&ImageRef> {
        if self.timeline.is_empty() {
            return self.portrait.as_ref();
        }
        self.timeline.resolve_display_image(&self.poses)
    }

    /// Pose labels that have an image on the current layer
    pub fn active_pose_keys(&self) -> Vec<&str> {
        self.timeline.active_pose_keys(&self.poses)
    }

    /// Wardrobe entries matching `filter`, flagged when currently worn
    pub fn browse(&self, filter: &WardrobeFilter) -> Vec<(Arc<GarmentDescriptor>, bool)> {
        self.wardrobe
            .filter(filter)
            .map(|g| (Arc::clone(g), self.timeline.is_worn(&g.id)))
            .collect()
    }

    pub fn lookbook(&self) -> Lookbook {
        Lookbook {
            image: self.display_image().cloned(),
            garments: self.timeline.active_garments(),
        }
    }

    /// Share link for the current look. Fails when nothing is worn.
    pub fn share_link(&self, base_url: &str) -> StudioResult<String> {
        self.lookbook().share_url(base_url)
    }

    // ========== Session lifecycle ==========

    /// Finalize the base portrait and start dressing
    ///
    /// Resets the timeline to the bare portrait and the poses to the
    /// built-in list.
    pub fn start_session(&mut self, portrait: ImageRef) {
        self.session += 1;
        self.timeline.reset(PoseSequence::first_label(), portrait.clone());
        self.poses.reset();
        self.portrait = Some(portrait);
        self.finish_pending();
        self.last_error = None;
        info!(session = self.session, "session started");
    }

    /// Drop everything and return to the pre-session state
    pub fn end_session(&mut self) {
        self.session += 1;
        self.timeline.clear();
        self.poses.reset();
        self.wardrobe.reset();
        self.portrait = None;
        self.finish_pending();
        self.last_error = None;
        info!(session = self.session, "session ended");
    }

    // ========== History ==========

    pub fn can_undo(&self) -> bool {
        self.timeline.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.timeline.can_redo()
    }

    /// Step back one garment; the selected pose is kept
    pub fn undo(&mut self) -> bool {
        let moved = self.timeline.undo();
        debug!(moved, cursor = self.timeline.cursor(), "undo");
        moved
    }

    /// Step forward one garment; the selected pose is kept
    pub fn redo(&mut self) -> bool {
        let moved = self.timeline.redo();
        debug!(moved, cursor = self.timeline.cursor(), "redo");
        moved
    }

    /// Take off the top garment. The layer stays available for redo.
    pub fn remove_last_garment(&mut self) -> bool {
        if !self.timeline.undo() {
            return false;
        }
        self.poses.set_cursor(0);
        debug!(cursor = self.timeline.cursor(), "removed last garment");
        true
    }

    // ========== Apply garment ==========

    pub fn begin_apply_garment(&mut self, garment: Arc<GarmentDescriptor>) -> StudioResult<ApplyStart> {
        self.ensure_idle()?;
        let person = self.display_image().cloned().ok_or(StudioError::NoSession)?;

        if self.timeline.next_layer_wears(&garment.id) {
            self.timeline.redo();
            self.poses.set_cursor(0);
            debug!(id = %garment.id, "garment restored from redo history");
            return Ok(ApplyStart::Restored);
        }

        let base_layer = self.timeline.cursor();
        let pose_label = self.poses.current_label().to_string();
        Ok(ApplyStart::Generate(self.start_garment_job(
            garment, person, base_layer, pose_label,
        )))
    }

    fn start_garment_job(
        &mut self,
        garment: Arc<GarmentDescriptor>,
        person: ImageRef,
        base_layer: usize,
        pose_label: String,
    ) -> GarmentJob {
        self.set_pending(Pending::ApplyGarment, format!("Dressing in {}", garment.name));
        GarmentJob {
            session: self.session,
            base_layer,
            pose_label,
            garment,
            person,
        }
    }

    pub fn complete_apply_garment(
        &mut self,
        job: GarmentJob,
        result: StudioResult<ImageRef>,
    ) -> StudioResult<()> {
        if self.is_stale(job.session) {
            return Ok(());
        }
        self.finish_pending();

        let image = self.record(result, APPLY_CONTEXT)?;
        let garment = self.wardrobe.register(job.garment);
        let layer = Layer::dressed(Arc::clone(&garment), job.pose_label, image);
        let cursor = self.timeline.push_layer_after(job.base_layer, layer);
        info!(id = %garment.id, cursor, "garment applied");
        Ok(())
    }

    /// Apply a garment, generating the new look unless it can be restored
    pub async fn apply_garment(
        &mut self,
        gateway: &dyn ImageGateway,
        garment: Arc<GarmentDescriptor>,
    ) -> StudioResult<()> {
        match self.begin_apply_garment(garment)? {
            ApplyStart::Restored => Ok(()),
            ApplyStart::Generate(job) => {
                let result = job.run(gateway).await;
                self.complete_apply_garment(job, result)
            }
        }
    }

    /// Wrap uploaded garment bytes in a custom wardrobe entry
    ///
    /// The entry joins the wardrobe once it has been applied successfully.
    pub fn upload_garment(&self, name: &str, bytes: &[u8]) -> StudioResult<Arc<GarmentDescriptor>> {
        let image = image_ref_from_upload(bytes)?;
        Ok(Arc::new(GarmentDescriptor::custom_upload(name, image, Utc::now())))
    }

    // ========== Poses ==========

    pub fn begin_select_pose(&mut self, pose_index: usize) -> StudioResult<PoseStart> {
        self.ensure_idle()?;
        let layer_index = self.timeline.cursor();
        let layer = self.timeline.current_layer().ok_or(StudioError::NoSession)?;
        let label = self
            .poses
            .label(pose_index)
            .ok_or_else(|| StudioError::invalid_input(format!("No pose at index {}", pose_index)))?
            .to_string();

        if pose_index == self.poses.cursor() {
            return Ok(PoseStart::Unchanged);
        }
        if layer.has_pose(&label) {
            self.poses.set_cursor(pose_index);
            debug!(pose = %label, "pose served from cache");
            return Ok(PoseStart::Cached);
        }

        let base = layer.canonical_image().clone();
        let previous_pose = self.poses.cursor();
        // Show the target pose name while the image is generated
        self.poses.set_cursor(pose_index);
        self.set_pending(Pending::PoseChange, format!("Posing: {}", label));

        Ok(PoseStart::Generate(PoseJob {
            session: self.session,
            layer: layer_index,
            pose_index,
            previous_pose,
            label,
            base,
        }))
    }

    pub fn complete_select_pose(&mut self, job: PoseJob, result: StudioResult<ImageRef>) -> StudioResult<()> {
        if self.is_stale(job.session) {
            return Ok(());
        }
        self.finish_pending();

        match result {
            Ok(image) => {
                if let Some(layer) = self.timeline.layer_mut(job.layer) {
                    layer.insert_pose_image(job.label.clone(), image);
                }
                info!(pose = %job.label, layer = job.layer, "pose generated");
                Ok(())
            }
            Err(err) => {
                // Undo the optimistic move unless something else moved the cursor since
                if self.poses.cursor() == job.pose_index {
                    self.poses.set_cursor(job.previous_pose);
                }
                Err(self.fail(err, POSE_CONTEXT))
            }
        }
    }

    /// Select a pose, generating it for the current layer if needed
    pub async fn select_pose(&mut self, gateway: &dyn ImageGateway, pose_index: usize) -> StudioResult<()> {
        match self.begin_select_pose(pose_index)? {
            PoseStart::Unchanged | PoseStart::Cached => Ok(()),
            PoseStart::Generate(job) => {
                let result = job.run(gateway).await;
                self.complete_select_pose(job, result)
            }
        }
    }

    /// Target of a "previous pose" step, if any
    pub fn previous_pose_index(&self) -> Option<usize> {
        self.poses.previous_index(&self.active_pose_keys())
    }

    /// Target of a "next pose" step, if any
    pub fn next_pose_index(&self) -> Option<usize> {
        self.poses.next_index(&self.active_pose_keys())
    }

    pub async fn select_previous_pose(&mut self, gateway: &dyn ImageGateway) -> StudioResult<()> {
        match self.previous_pose_index() {
            Some(index) => self.select_pose(gateway, index).await,
            None => Ok(()),
        }
    }

    pub async fn select_next_pose(&mut self, gateway: &dyn ImageGateway) -> StudioResult<()> {
        match self.next_pose_index() {
            Some(index) => self.select_pose(gateway, index).await,
            None => Ok(()),
        }
    }

    pub fn begin_custom_pose(&mut self, reference: ImageRef) -> StudioResult<CustomPoseJob> {
        self.ensure_idle()?;
        let layer = self.timeline.current_layer().ok_or(StudioError::NoSession)?;
        let base = layer.canonical_image().clone();
        let label = self.poses.next_custom_label();
        self.set_pending(Pending::CustomPose, "Copying the reference pose".to_string());

        Ok(CustomPoseJob {
            session: self.session,
            layer: self.timeline.cursor(),
            label,
            base,
            reference,
        })
    }

    pub fn complete_custom_pose(
        &mut self,
        job: CustomPoseJob,
        result: StudioResult<ImageRef>,
    ) -> StudioResult<()> {
        if self.is_stale(job.session) {
            return Ok(());
        }
        self.finish_pending();

        match result {
            Ok(image) => {
                // Label and image are committed together
                let index = self.poses.push_custom(job.label.clone());
                if let Some(layer) = self.timeline.layer_mut(job.layer) {
                    layer.insert_pose_image(job.label.clone(), image);
                }
                self.poses.set_cursor(index);
                info!(pose = %job.label, layer = job.layer, "custom pose added");
                Ok(())
            }
            Err(err) => Err(self.fail(err, CUSTOM_POSE_CONTEXT)),
        }
    }

    /// Re-pose the current layer after a reference photo
    pub async fn select_custom_pose(
        &mut self,
        gateway: &dyn ImageGateway,
        reference: ImageRef,
    ) -> StudioResult<()> {
        let job = self.begin_custom_pose(reference)?;
        let result = job.run(gateway).await;
        self.complete_custom_pose(job, result)
    }

    /// Same as `select_custom_pose`, validating uploaded reference bytes first
    pub async fn select_custom_pose_upload(
        &mut self,
        gateway: &dyn ImageGateway,
        bytes: &[u8],
    ) -> StudioResult<()> {
        let reference = image_ref_from_upload(bytes).map_err(|e| self.fail(e, CUSTOM_POSE_CONTEXT))?;
        self.select_custom_pose(gateway, reference).await
    }

    // ========== Recolor ==========

    pub fn begin_recolor(&mut self, item: Arc<GarmentDescriptor>, color: &str) -> StudioResult<RecolorJob> {
        self.ensure_idle()?;
        let person = self.display_image().cloned().ok_or(StudioError::NoSession)?;
        let job = RecolorJob {
            session: self.session,
            base_layer: self.timeline.cursor(),
            pose_label: self.poses.current_label().to_string(),
            item,
            color: color.to_string(),
            person,
        };
        self.set_pending(Pending::Recolor, format!("Recoloring to {}", color));
        Ok(job)
    }

    /// Register the recolored garment and start applying it
    ///
    /// The new garment stays in the wardrobe even if applying it fails
    /// later on. Busy stays set across the hand-over to the try-on job.
    pub fn complete_recolor(
        &mut self,
        job: RecolorJob,
        result: StudioResult<ImageRef>,
    ) -> StudioResult<GarmentJob> {
        if self.is_stale(job.session) {
            return Err(StudioError::NoSession);
        }

        let image = match result {
            Ok(image) => image,
            Err(err) => {
                self.finish_pending();
                return Err(self.fail(err, RECOLOR_CONTEXT));
            }
        };

        let derived = Arc::new(job.item.recolored(&job.color, image, Utc::now()));
        let derived = self.wardrobe.register_front(derived);
        info!(id = %derived.id, "recolored garment registered");

        Ok(self.start_garment_job(derived, job.person, job.base_layer, job.pose_label))
    }

    /// Recolor a garment and put the result on
    pub async fn recolor(
        &mut self,
        gateway: &dyn ImageGateway,
        item: Arc<GarmentDescriptor>,
        color: &str,
    ) -> StudioResult<()> {
        let job = self.begin_recolor(item, color)?;
        let result = job.run(gateway).await;
        let apply = self.complete_recolor(job, result)?;
        let result = apply.run(gateway).await;
        self.complete_apply_garment(apply, result)
    }

    // ========== Internals ==========

    fn ensure_idle(&self) -> StudioResult<()> {
        match self.pending {
            Some(kind) => {
                debug!(?kind, "rejected request while busy");
                Err(StudioError::Busy)
            }
            None => Ok(()),
        }
    }

    fn set_pending(&mut self, kind: Pending, message: String) {
        self.pending = Some(kind);
        self.loading_message = Some(message);
        self.last_error = None;
    }

    fn finish_pending(&mut self) {
        self.pending = None;
        self.loading_message = None;
    }

    fn is_stale(&self, session: u64) -> bool {
        if session != self.session {
            warn!(session, current = self.session, "dropping result from an ended session");
            return true;
        }
        false
    }

    fn record(&mut self, result: StudioResult<ImageRef>, context: &str) -> StudioResult<ImageRef> {
        result.map_err(|err| self.fail(err, context))
    }

    fn fail(&mut self, err: StudioError, context: &str) -> StudioError {
        let message = err.user_message(context);
        warn!(error = %err, "{}", context);
        self.last_error = Some(message);
        err
    }
}

/// Generate a studio portrait from uploaded photo bytes
///
/// Runs before a session exists; pass the result to `Studio::start_session`
/// once the user accepts it.
pub async fn generate_portrait(
    gateway: &dyn ImageGateway,
    photo: &[u8],
    mode: GenerationMode,
) -> StudioResult<ImageRef> {
    let photo = image_ref_from_upload(photo)?;
    gateway.generate_portrait(&photo, mode).await
}
