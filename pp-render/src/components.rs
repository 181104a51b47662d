use bevy::prelude::*;

/// Root entity of the loaded human model; carries the normalized transform.
#[derive(Component)]
pub struct HumanModel;

/// The camera that renders the model into the measured viewport.
#[derive(Component)]
pub struct ModelCamera;
