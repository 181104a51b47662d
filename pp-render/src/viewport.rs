use bevy::math::UVec2;
use bevy::prelude::*;
use bevy::render::camera::Viewport;
use bevy::window::{PrimaryWindow, WindowResized, WindowScaleFactorChanged};
use pp_utils::{PageConfig, PortalConfig, ViewportRect};
use tracing::debug;

use crate::components::ModelCamera;

/// Center column of the three-column page for a window of the given logical size.
pub fn measure(page: &PageConfig, window_width: f32, window_height: f32) -> ViewportRect {
    let left = page.padding + page.side_column_width + page.gap;
    let top = page.padding;
    ViewportRect::new(
        (window_width - 2.0 * left).max(0.0),
        (window_height - 2.0 * top).max(0.0),
        left,
        top,
    )
}

/// Physical position and size of `rect`, clipped to the window.
///
/// `None` when nothing of the rect is visible.
pub fn physical_viewport(
    rect: &ViewportRect,
    scale_factor: f32,
    window_size: UVec2,
) -> Option<(UVec2, UVec2)> {
    if !rect.has_area() || !(scale_factor > 0.0) {
        return None;
    }
    let x = (rect.left * scale_factor).round().max(0.0) as u32;
    let y = (rect.top * scale_factor).round().max(0.0) as u32;
    if x >= window_size.x || y >= window_size.y {
        return None;
    }
    let w = ((rect.width * scale_factor).round() as u32).min(window_size.x - x);
    let h = ((rect.height * scale_factor).round() as u32).min(window_size.y - y);
    if w == 0 || h == 0 {
        return None;
    }
    Some((UVec2::new(x, y), UVec2::new(w, h)))
}

fn write_measurement(window: &Window, config: &PortalConfig, rect: &mut ResMut<ViewportRect>) {
    let measured = measure(&config.page, window.width(), window.height());
    if rect.set_if_neq(measured) {
        debug!(
            width = measured.width,
            height = measured.height,
            left = measured.left,
            top = measured.top,
            "viewport measured"
        );
    }
}

pub fn measure_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<PortalConfig>,
    mut rect: ResMut<ViewportRect>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    write_measurement(window, &config, &mut rect);
}

pub fn remeasure_on_resize(
    mut resized: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<PortalConfig>,
    mut rect: ResMut<ViewportRect>,
) {
    if resized.is_empty() {
        return;
    }
    resized.clear();
    let Ok(window) = windows.single() else {
        return;
    };
    write_measurement(window, &config, &mut rect);
}

pub fn sync_camera_viewport(
    rect: Res<ViewportRect>,
    mut scale_changes: EventReader<WindowScaleFactorChanged>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Camera, With<ModelCamera>>,
) {
    let scale_changed = !scale_changes.is_empty();
    scale_changes.clear();
    if !rect.is_changed() && !scale_changed {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let window_size = UVec2::new(window.physical_width(), window.physical_height());
    let physical = physical_viewport(&rect, window.scale_factor(), window_size);
    for mut camera in &mut cameras {
        match physical {
            Some((physical_position, physical_size)) => {
                camera.is_active = true;
                camera.viewport = Some(Viewport {
                    physical_position,
                    physical_size,
                    ..default()
                });
            }
            None => {
                camera.is_active = false;
            }
        }
    }
}
