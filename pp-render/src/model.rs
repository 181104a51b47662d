//! Loading the human model, fitting it to the view, and the click toggle.

use std::collections::HashSet;

use bevy::picking::events::{Click, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use bevy::render::mesh::skinning::SkinnedMesh;
use bevy::scene::SceneInstanceReady;
use pp_model::{Bounds3, NodeKind, NormalizeOutcome, NormalizeSettings, SceneNode, normalize};
use pp_utils::{ModelConfig, OverlayState, PortalConfig};
use tracing::{debug, info, warn};

use crate::components::HumanModel;

type NodeQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Transform,
        Option<&'static Name>,
        Option<&'static Mesh3d>,
        Option<&'static Children>,
    ),
>;

pub fn normalize_settings(config: &ModelConfig) -> NormalizeSettings {
    NormalizeSettings {
        target_height: config.target_height,
        vertical_offset: config.vertical_offset,
        reference_bone: config.reference_bone.clone(),
    }
}

pub fn spawn_human_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<PortalConfig>,
) {
    info!(path = %config.model.path, "loading model");
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.model.path.clone()));
    commands
        .spawn((
            Name::new("HumanModel"),
            HumanModel,
            SceneRoot(scene),
            Transform::default(),
        ))
        .observe(normalize_on_scene_ready)
        .observe(toggle_overlay_on_click);
}

pub fn toggle_overlay_on_click(trigger: Trigger<Pointer<Click>>, mut overlay: ResMut<OverlayState>) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    overlay.toggle();
    debug!(open = overlay.is_open(), "model clicked");
}

pub fn normalize_on_scene_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    nodes: NodeQuery,
    skins: Query<&SkinnedMesh>,
    meshes: Res<Assets<Mesh>>,
    config: Res<PortalConfig>,
) {
    let root = trigger.target();
    let Some(mut scene) = snapshot_scene(root, &nodes, &skins, &meshes) else {
        warn!(?root, "model root vanished before normalization");
        return;
    };

    let settings = normalize_settings(&config.model);
    if let NormalizeOutcome::Applied(fit) = normalize(&mut scene, &settings) {
        info!(
            tier = ?fit.tier,
            scale = fit.scale,
            nodes = scene.node_count(),
            "model fitted to view"
        );
        commands.entity(root).insert(scene.transform);
    }
}

/// Copies the hierarchy under `root` into a [`SceneNode`] tree.
///
/// Entities listed as joints of any skinned mesh in the subtree become bones.
pub fn snapshot_scene(
    root: Entity,
    nodes: &NodeQuery,
    skins: &Query<&SkinnedMesh>,
    meshes: &Assets<Mesh>,
) -> Option<SceneNode> {
    let mut joints = HashSet::new();
    collect_joints(root, nodes, skins, &mut joints);
    snapshot_node(root, nodes, skins, meshes, &joints)
}

fn collect_joints(
    entity: Entity,
    nodes: &NodeQuery,
    skins: &Query<&SkinnedMesh>,
    joints: &mut HashSet<Entity>,
) {
    if let Ok(skin) = skins.get(entity) {
        joints.extend(skin.joints.iter().copied());
    }
    let Ok((_, _, _, Some(children))) = nodes.get(entity) else {
        return;
    };
    let children: &[Entity] = children;
    for &child in children {
        collect_joints(child, nodes, skins, joints);
    }
}

fn snapshot_node(
    entity: Entity,
    nodes: &NodeQuery,
    skins: &Query<&SkinnedMesh>,
    meshes: &Assets<Mesh>,
    joints: &HashSet<Entity>,
) -> Option<SceneNode> {
    let (transform, name, mesh, children) = nodes.get(entity).ok()?;

    let kind = match mesh {
        Some(mesh) => {
            let bounds = meshes
                .get(&mesh.0)
                .and_then(|m| m.compute_aabb())
                .map(|aabb| {
                    Bounds3::from_center_half_extents(aabb.center.into(), aabb.half_extents.into())
                });
            if skins.contains(entity) {
                NodeKind::SkinnedMesh { bounds }
            } else {
                NodeKind::Mesh { bounds }
            }
        }
        None if joints.contains(&entity) => NodeKind::Bone,
        None => NodeKind::Group,
    };

    let mut node = SceneNode::new(kind).with_transform(*transform);
    node.name = name.map(|n| n.as_str().to_string());
    if let Some(children) = children {
        let children: &[Entity] = children;
        node.children = children
            .iter()
            .filter_map(|&child| snapshot_node(child, nodes, skins, meshes, joints))
            .collect();
    }
    Some(node)
}
