use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use pp_utils::{OverlayState, PortalConfig, ViewportRect};

pub mod camera;
mod components;
pub mod model;
pub mod viewport;

pub use camera::OrbitCamera;
pub use components::{HumanModel, ModelCamera};

const PAGE_BACKGROUND: Color = Color::srgb(0.914, 0.941, 1.0);

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MeshPickingPlugin)
            .init_resource::<PortalConfig>()
            .init_resource::<ViewportRect>()
            .init_resource::<OverlayState>()
            .insert_resource(ClearColor(PAGE_BACKGROUND))
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    camera::spawn_lights,
                    model::spawn_human_model,
                    viewport::measure_viewport,
                ),
            )
            .add_systems(
                Update,
                (
                    viewport::remeasure_on_resize,
                    viewport::sync_camera_viewport.after(viewport::remeasure_on_resize),
                    camera::orbit_camera.after(viewport::remeasure_on_resize),
                ),
            );
    }
}
