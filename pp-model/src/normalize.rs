use bevy::math::{Affine3A, Vec3};
use bevy::prelude::Transform;
use thiserror::Error;
use tracing::{debug, warn};

use crate::bounds::Bounds3;
use crate::scene::{Located, SceneNode};

/// Height, in world units, a normalized model is scaled to.
pub const TARGET_HEIGHT: f32 = 1.9;
/// How far below center the recentered model sits.
pub const VERTICAL_OFFSET: f32 = 1.05;
/// Bone used as target when an asset has no skinned mesh.
pub const REFERENCE_BONE: &str = "mixamorigHips";

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeSettings {
    pub target_height: f32,
    pub vertical_offset: f32,
    pub reference_bone: String,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            target_height: TARGET_HEIGHT,
            vertical_offset: VERTICAL_OFFSET,
            reference_bone: REFERENCE_BONE.to_string(),
        }
    }
}

/// Which fallback tier supplied the node the model was measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTier {
    SkinnedMesh,
    ReferenceBone,
    Mesh,
    Root,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelFit {
    pub tier: TargetTier,
    pub bounds: Bounds3,
    pub scale: f32,
    pub translation: Vec3,
}

impl ModelFit {
    /// Writes the uniform scale and translation, leaving rotation alone.
    pub fn apply(&self, transform: &mut Transform) {
        transform.scale = Vec3::splat(self.scale);
        transform.translation = self.translation;
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("bounding box height {height} of {tier:?} target is zero or not finite")]
    DegenerateBounds { tier: TargetTier, height: f32 },

    #[error("computed transform is not finite (scale {scale}, translation {translation})")]
    NonFiniteTransform { scale: f32, translation: Vec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    Applied(ModelFit),
    Skipped(NormalizeError),
}

impl NormalizeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, NormalizeOutcome::Applied(_))
    }
}

pub fn select_target<'a>(
    root: &'a SceneNode,
    settings: &NormalizeSettings,
) -> (TargetTier, Located<'a>) {
    if let Some(found) = root.find_first(|n| n.kind.is_skinned_mesh()) {
        return (TargetTier::SkinnedMesh, found);
    }
    if let Some(found) = root.find_first(|n| n.is_named(&settings.reference_bone)) {
        return (TargetTier::ReferenceBone, found);
    }
    if let Some(found) = root.find_first(|n| n.kind.is_mesh()) {
        return (TargetTier::Mesh, found);
    }

    warn!("no mesh found, using scene root as normalization target");
    (
        TargetTier::Root,
        Located {
            node: root,
            to_root: Affine3A::IDENTITY,
        },
    )
}

/// Computes the root transform that brings the model to the target height,
/// without touching the scene.
pub fn fit_model(root: &SceneNode, settings: &NormalizeSettings) -> Result<ModelFit, NormalizeError> {
    let (tier, target) = select_target(root, settings);
    let bounds = target.bounds();
    let size = bounds.size();

    if size.y == 0.0 || !size.y.is_finite() {
        return Err(NormalizeError::DegenerateBounds {
            tier,
            height: size.y,
        });
    }

    let center = bounds.center();
    let scale = settings.target_height / size.y;
    // Bounds live in the root's local frame, so the scaled center is carried
    // through the root's kept rotation before being cancelled.
    let translation = -(root.transform.rotation * (center * scale))
        + Vec3::Y * (settings.target_height / 2.0 - settings.vertical_offset);

    if !scale.is_finite() || scale == 0.0 || !translation.is_finite() {
        return Err(NormalizeError::NonFiniteTransform { scale, translation });
    }

    Ok(ModelFit {
        tier,
        bounds,
        scale,
        translation,
    })
}

/// Rescales and recenters `root` in place.
///
/// On degenerate geometry the root keeps its previous transform.
pub fn normalize(root: &mut SceneNode, settings: &NormalizeSettings) -> NormalizeOutcome {
    match fit_model(root, settings) {
        Ok(fit) => {
            fit.apply(&mut root.transform);
            debug!(
                tier = ?fit.tier,
                scale = fit.scale,
                translation = ?fit.translation,
                "normalized model"
            );
            NormalizeOutcome::Applied(fit)
        }
        Err(err) => {
            warn!("skipping model normalization: {err}");
            NormalizeOutcome::Skipped(err)
        }
    }
}
