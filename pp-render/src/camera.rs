use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use pp_utils::{CameraConfig, PortalConfig, ViewportRect};

use crate::components::ModelCamera;

/// Orbit around a fixed target. Pan and zoom are not supported.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Rotation around +Y, zero looking down -Z from +Z.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub sensitivity: f32,
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig, target: Vec3) -> Self {
        let offset = Vec3::from_array(config.position) - target;
        let radius = offset.length().max(f32::EPSILON);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: polar.clamp(config.min_polar_angle, config.max_polar_angle),
            min_polar: config.min_polar_angle,
            max_polar: config.max_polar_angle,
            sensitivity: config.orbit_sensitivity,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    /// Applies a mouse drag, in logical pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.azimuth -= drag.x * self.sensitivity;
        self.polar = (self.polar - drag.y * self.sensitivity).clamp(self.min_polar, self.max_polar);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_camera(mut commands: Commands, config: Res<PortalConfig>) {
    let orbit = OrbitCamera::from_config(&config.camera, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera.fov_degrees.to_radians(),
            ..default()
        }),
        orbit.transform(),
        orbit,
        ModelCamera,
    ));
}

pub fn spawn_lights(mut commands: Commands, config: Res<PortalConfig>) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(config.camera.light_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: config.camera.ambient_brightness,
        affects_lightmapped_meshes: true,
    });
}

pub fn orbit_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rect: Res<ViewportRect>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    mut dragging: Local<bool>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        *dragging = windows
            .single()
            .ok()
            .and_then(Window::cursor_position)
            .is_some_and(|cursor| rect.contains(cursor.x, cursor.y));
    }
    if !buttons.pressed(MouseButton::Left) {
        *dragging = false;
    }
    if !*dragging {
        motion_events.clear();
        return;
    }

    let mut drag = Vec2::ZERO;
    for ev in motion_events.read() {
        drag += ev.delta;
    }
    if drag == Vec2::ZERO {
        return;
    }

    for (mut orbit, mut transform) in &mut cameras {
        orbit.rotate(drag);
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), Vec3::ZERO)
    }

    #[test]
    fn starts_at_configured_position() {
        let o = orbit();
        assert!((o.position() - Vec3::new(0.0, 0.8, 2.6)).length() < 1e-5);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut o = orbit();
        o.rotate(Vec2::new(0.0, 1.0e6));
        assert_eq!(o.polar, o.min_polar);
        o.rotate(Vec2::new(0.0, -1.0e6));
        assert_eq!(o.polar, o.max_polar);
    }

    #[test]
    fn horizontal_drag_keeps_radius_and_height() {
        let mut o = orbit();
        let before = o.position();
        o.rotate(Vec2::new(200.0, 0.0));
        let after = o.position();
        assert!((after.length() - before.length()).abs() < 1e-5);
        assert!((after.y - before.y).abs() < 1e-5);
        assert!((after - before).length() > 0.1);
    }

    #[test]
    fn transform_looks_at_target() {
        let t = orbit().transform();
        let forward = t.forward();
        let to_target = (Vec3::ZERO - t.translation).normalize();
        assert!(forward.dot(to_target) > 0.9999);
    }
}
