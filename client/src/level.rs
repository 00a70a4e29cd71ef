//! Model loading: spawn the glTF scene, then once it is in the world re-center it on the
//! ground, register its meshes as collidable surfaces and find the door.

use bevy::{
    asset::LoadState,
    mesh::{Indices, PrimitiveTopology, VertexAttributeValues},
    platform::collections::HashSet,
    prelude::*,
    scene::SceneInstance,
};
use walkthrough_shared::{
    MIN_COLLIDABLE_SIZE, SceneBounds, SurfaceDef, SurfaceShape, is_collidable_extent,
    is_door_name,
};

use crate::{
    door::Door,
    player::{Collision, Navigation},
    transform::to_sim,
    world::GROUND_SURFACE_ID,
};

const MODEL_PATH: &str = "arvr5.glb";

#[derive(Component)]
struct ModelRoot;

/// Marks a model root whose scene has been processed (or failed to load).
#[derive(Component)]
struct ModelProcessed;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_model);
    app.add_systems(Update, (report_load_failure, on_model_ready));
}

fn spawn_model(mut commands: Commands, asset_server: Res<AssetServer>) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(MODEL_PATH));
    commands.spawn((
        Name::new("Model"),
        ModelRoot,
        SceneRoot(scene),
        Transform::default(),
    ));
    info!("Loading model {MODEL_PATH}");
}

fn report_load_failure(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    roots: Query<(Entity, &SceneRoot), (With<ModelRoot>, Without<ModelProcessed>)>,
) {
    for (entity, root) in &roots {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(root.0.id()) {
            error!("Error loading model {MODEL_PATH}: {err}");
            commands.entity(entity).insert(ModelProcessed);
        }
    }
}

/// World-space triangles of one mesh entity.
struct LoadedMesh {
    entity: Entity,
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
    bounds: SceneBounds,
}

fn on_model_ready(
    mut commands: Commands,
    scene_spawner: Res<SceneSpawner>,
    mut roots: Query<
        (Entity, &SceneInstance, &mut Transform),
        (With<ModelRoot>, Without<ModelProcessed>),
    >,
    children: Query<&Children>,
    names: Query<&Name>,
    mesh_entities: Query<(&Mesh3d, &GlobalTransform)>,
    local_transforms: Query<&Transform, Without<ModelRoot>>,
    meshes: Res<Assets<Mesh>>,
    mut collision: ResMut<Collision>,
    mut navigation: ResMut<Navigation>,
) {
    for (root, instance, mut root_transform) in &mut roots {
        if !scene_spawner.instance_is_ready(**instance) {
            continue;
        }

        let door = children.iter_descendants(root).find(|e| {
            names
                .get(*e)
                .is_ok_and(|name| is_door_name(name.as_str()))
        });
        let door_parts: HashSet<Entity> = door
            .map(|d| std::iter::once(d).chain(children.iter_descendants(d)).collect())
            .unwrap_or_default();

        let loaded: Vec<LoadedMesh> = children
            .iter_descendants(root)
            .filter_map(|entity| {
                let (mesh3d, global) = mesh_entities.get(entity).ok()?;
                let mesh = meshes.get(&mesh3d.0)?;
                let (local, indices) = triangles(mesh)?;
                let vertices: Vec<Vec3> =
                    local.iter().map(|p| global.transform_point(*p)).collect();
                let points: Vec<_> = vertices.iter().map(|v| to_sim(*v)).collect();
                let bounds = SceneBounds::from_points(&points)?;
                Some(LoadedMesh {
                    entity,
                    vertices,
                    indices,
                    bounds,
                })
            })
            .collect();

        let Some(raw_bounds) = loaded
            .iter()
            .map(|m| m.bounds)
            .reduce(|a, b| a.union(&b))
        else {
            warn!("Model has no mesh geometry, nothing to register");
            commands.entity(root).insert(ModelProcessed);
            continue;
        };

        let offset = raw_bounds.grounding_offset();
        root_transform.translation += Vec3::new(offset.x, offset.y, offset.z);
        let bounds = raw_bounds.translated(&offset);

        // The door swings, so it stays out of the static collidable set.
        let mut defs = Vec::new();
        for mesh in loaded.iter().filter(|m| !door_parts.contains(&m.entity)) {
            if !is_collidable_extent(&mesh.bounds.size(), MIN_COLLIDABLE_SIZE) {
                continue;
            }
            let vertices = mesh.vertices.iter().map(|v| to_sim(*v) + offset).collect();
            let id = GROUND_SURFACE_ID + 1 + defs.len() as u32;
            defs.push(SurfaceDef::world_space(
                id,
                SurfaceShape::TriMesh {
                    vertices,
                    indices: mesh.indices.clone(),
                },
            ));
        }

        let collidable = defs.len();
        if let Err(e) = collision.register_all(defs) {
            error!("Failed to register model collision: {e}");
        }

        if let Some(door) = door {
            let base_rotation = local_transforms
                .get(door)
                .map(|t| t.rotation)
                .unwrap_or(Quat::IDENTITY);
            commands.entity(door).insert(Door { base_rotation });
        }

        navigation.load_scene(Some(bounds));
        commands.entity(root).insert(ModelProcessed);

        let size = bounds.size();
        info!("Model loaded successfully");
        info!("Model size: {:.2} x {:.2} x {:.2}", size.x, size.y, size.z);
        info!(
            "Collision meshes: {} of {} (plus ground)",
            collidable,
            loaded.len()
        );
        match door.and_then(|d| names.get(d).ok()) {
            Some(name) => {
                info!("Door found: {name} (animated only, it does not block movement)");
            }
            None => info!("Door not found"),
        }
    }
}

/// Positions and triangle indices of a triangle-list mesh. Non-indexed meshes are treated as
/// consecutive vertex triples.
fn triangles(mesh: &Mesh) -> Option<(Vec<Vec3>, Vec<[u32; 3]>)> {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return None;
    }
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };

    let flat: Vec<u32> = match mesh.indices() {
        Some(Indices::U16(i)) => i.iter().map(|&v| u32::from(v)).collect(),
        Some(Indices::U32(i)) => i.clone(),
        None => (0..positions.len() as u32).collect(),
    };
    let indices: Vec<[u32; 3]> = flat
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect();
    if indices.is_empty() {
        return None;
    }

    let vertices = positions.iter().map(|p| Vec3::from_array(*p)).collect();
    Some((vertices, indices))
}
