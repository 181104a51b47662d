use std::path::{Path, PathBuf};

use bevy::ecs::resource::Resource;
use tracing::warn;

pub mod config;
pub mod demo;
pub mod patient;

pub use config::{CameraConfig, ConfigError, ModelConfig, OverlayConfig, PageConfig, PortalConfig};
pub use demo::{
    MEDICAL_TIMELINE, STATS, StatEntry, TimelineEntry, VITALS, VitalEntry, demo_patient, stat_for,
};
pub use patient::{PatientRecord, PatientStore};

pub const PATIENT_PORTAL_ASSETS_ROOT_ENV: &str = "PATIENT_PORTAL_ASSETS_ROOT";

/// Directory the asset server reads the model from.
///
/// Lookup order: `PATIENT_PORTAL_ASSETS_ROOT`, an `assets` directory next to
/// the executable, then this workspace's `pp-client/assets`. Falls back to a
/// relative `assets` when none exist.
pub fn portal_assets_root() -> PathBuf {
    let explicit = std::env::var_os(PATIENT_PORTAL_ASSETS_ROOT_ENV).map(PathBuf::from);
    if let Some(path) = &explicit
        && !path.exists()
    {
        warn!(path = %path.display(), "{PATIENT_PORTAL_ASSETS_ROOT_ENV} does not exist, ignoring");
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets")));
    let in_workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../pp-client/assets");

    explicit
        .into_iter()
        .chain(beside_exe)
        .chain(std::iter::once(in_workspace))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from("assets"))
}

/// Whether the stat ring around the model is showing.
///
/// Written only by the model click observer.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open,
}

impl OverlayState {
    pub fn is_open(self) -> bool {
        matches!(self, OverlayState::Open)
    }

    pub fn toggle(&mut self) {
        *self = match self {
            OverlayState::Closed => OverlayState::Open,
            OverlayState::Open => OverlayState::Closed,
        };
    }
}

/// Measured rectangle of the model viewport, in logical pixels.
///
/// Written only by the viewport measurement system, read by layout and camera code.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

impl Default for ViewportRect {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            left: 0.0,
            top: 0.0,
        }
    }
}

impl ViewportRect {
    pub fn new(width: f32, height: f32, left: f32, top: f32) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// True when the rect covers a visible, finite area.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}
