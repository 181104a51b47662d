//! Scene-graph model normalization.
//!
//! A loaded asset is described as a [`SceneNode`] tree. [`normalize`] picks a
//! representative node, measures it, and writes a uniform scale and
//! translation on the root so the model stands [`TARGET_HEIGHT`] tall and is
//! recentered in view. Degenerate geometry leaves the root untouched.

mod bounds;
mod normalize;
mod scene;

pub use bounds::Bounds3;
pub use normalize::{
    ModelFit, NormalizeError, NormalizeOutcome, NormalizeSettings, REFERENCE_BONE, TARGET_HEIGHT,
    TargetTier, VERTICAL_OFFSET, fit_model, normalize, select_target,
};
pub use scene::{Located, NodeKind, SceneNode};
