use bevy::prelude::*;
use pp_utils::{OverlayState, PatientStore, PortalConfig, ViewportRect, demo_patient};

pub struct PortalCorePlugin {
    config: PortalConfig,
}

impl PortalCorePlugin {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }
}

impl Plugin for PortalCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(PatientStore::with_record(demo_patient()))
            .insert_resource(OverlayState::default())
            .insert_resource(ViewportRect::default());
    }
}
