use std::f32::consts::TAU;

use bevy::prelude::*;
use jackrun_shared::{
    CapsuleSpec, Character, CharacterHandle, ColliderShapeDef, WorldStaticDef, camera::head_look_rotation,
    collision::{Quat as SimQuat, Vec3 as SimVec3},
    constants::WALK_ANIMATION,
};

use crate::{
    convert,
    simulation::{SceneReloaded, SimScene},
};

/// Vertical travel of the walk bob at full walk weight (meters).
const WALK_BOB_HEIGHT: f32 = 0.06;
const HEAD_RADIUS: f32 = 0.2;

/// Scene view of one simulated character.
#[derive(Component)]
pub struct CharacterVisual {
    pub name: String,
    pub handle: CharacterHandle,
}

#[derive(Component)]
struct CharacterTorso;

#[derive(Component)]
struct CharacterHead;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Startup,
        (spawn_scenery, (load_character_assets, spawn_characters).chain()),
    );
    app.add_systems(
        PostUpdate,
        (respawn_visuals, sync_characters)
            .chain()
            .before(TransformSystems::Propagate),
    );
}

/// Static scenery shared by the physics scene and the renderer.
pub fn scenery() -> Vec<WorldStaticDef> {
    let crate_box = |id: u32, x: f32, z: f32, size: f32| WorldStaticDef {
        id,
        translation: SimVec3::new(x, size * 0.5, z),
        rotation: SimQuat::from_axis_angle(&SimVec3::y_axis(), 0.3 * id as f32),
        shape: ColliderShapeDef::Cuboid {
            half_extents: SimVec3::repeat(size * 0.5),
        },
    };

    vec![
        WorldStaticDef::floor(),
        crate_box(1, 4.0, -8.0, 2.0),
        crate_box(2, -5.0, -14.0, 3.0),
        crate_box(3, 2.0, 6.0, 1.5),
        WorldStaticDef {
            id: 4,
            translation: SimVec3::new(-3.0, 0.5, -4.0),
            rotation: SimQuat::identity(),
            shape: ColliderShapeDef::Sphere { radius: 1.2 },
        },
    ]
}

fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::linear_rgb(0.2, 0.3, 0.25),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });
    let prop_material = materials.add(Color::srgb_u8(124, 144, 255));

    for def in scenery() {
        let (mesh, material) = match def.shape {
            ColliderShapeDef::Cuboid { half_extents } if def.id == 0 => (
                meshes.add(Cuboid::from_size(convert::vec3(half_extents * 2.0))),
                floor_material.clone(),
            ),
            ColliderShapeDef::Cuboid { half_extents } => (
                meshes.add(Cuboid::from_size(convert::vec3(half_extents * 2.0))),
                prop_material.clone(),
            ),
            ColliderShapeDef::Sphere { radius } => {
                (meshes.add(Sphere::new(radius)), prop_material.clone())
            }
        };

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(convert::vec3(def.translation))
                .with_rotation(convert::quat(def.rotation)),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Shared meshes and materials of character visuals.
#[derive(Resource, Default)]
pub struct CharacterVisualAssets {
    torso: Handle<Mesh>,
    head: Handle<Mesh>,
    nose: Handle<Mesh>,
    body_material: Handle<StandardMaterial>,
    head_material: Handle<StandardMaterial>,
}

fn load_character_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let capsule = CapsuleSpec::default();
    commands.insert_resource(CharacterVisualAssets {
        torso: meshes.add(Capsule3d::new(capsule.radius(), capsule.half_height() * 2.0)),
        head: meshes.add(Sphere::new(HEAD_RADIUS)),
        nose: meshes.add(Cuboid::new(0.06, 0.06, 0.12)),
        body_material: materials.add(Color::srgb(0.85, 0.45, 0.2)),
        head_material: materials.add(Color::srgb(0.95, 0.8, 0.65)),
    });
}

fn spawn_visual(
    commands: &mut Commands,
    assets: &CharacterVisualAssets,
    handle: CharacterHandle,
    character: &Character,
) {
    let capsule = CapsuleSpec::default();
    commands
        .spawn((
            CharacterVisual {
                name: character.name().to_string(),
                handle,
            },
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                CharacterTorso,
                Mesh3d(assets.torso.clone()),
                MeshMaterial3d(assets.body_material.clone()),
                Transform::from_xyz(0.0, capsule.offset_y, 0.0),
            ));
            parent
                .spawn((
                    CharacterHead,
                    Mesh3d(assets.head.clone()),
                    MeshMaterial3d(assets.head_material.clone()),
                    Transform::from_xyz(0.0, capsule.height + HEAD_RADIUS * 0.5, 0.0),
                ))
                .with_children(|head| {
                    // Nose, so the look direction is visible.
                    head.spawn((
                        Mesh3d(assets.nose.clone()),
                        MeshMaterial3d(assets.head_material.clone()),
                        Transform::from_xyz(0.0, 0.0, -HEAD_RADIUS),
                    ));
                });
        });
}

fn spawn_characters(
    mut commands: Commands,
    sim: Res<SimScene>,
    assets: Res<CharacterVisualAssets>,
) {
    for (handle, character) in sim.scene.characters() {
        spawn_visual(&mut commands, &assets, handle, character);
    }
    log::debug!("spawned {} character visual(s)", sim.scene.characters().count());
}

/// A load replaces every character, so rebuild the visuals from the loaded scene.
fn respawn_visuals(
    mut commands: Commands,
    mut reloaded: MessageReader<SceneReloaded>,
    sim: Res<SimScene>,
    assets: Res<CharacterVisualAssets>,
    visuals: Query<Entity, With<CharacterVisual>>,
) {
    if reloaded.read().count() == 0 {
        return;
    }
    for entity in &visuals {
        commands.entity(entity).despawn();
    }
    spawn_characters(commands, sim, assets);
}

fn sync_characters(
    sim: Res<SimScene>,
    mut visuals: Query<(&CharacterVisual, &mut Transform, &Children)>,
    mut torsos: Query<&mut Transform, (With<CharacterTorso>, Without<CharacterVisual>)>,
    mut heads: Query<
        &mut Transform,
        (With<CharacterHead>, Without<CharacterVisual>, Without<CharacterTorso>),
    >,
) {
    let capsule = CapsuleSpec::default();

    for (visual, mut transform, children) in &mut visuals {
        let handle = visual.handle;
        let (Some(character), Some(pose)) =
            (sim.scene.character(handle), sim.scene.character_pose(handle))
        else {
            continue;
        };

        let facing = character.controls.orientation();
        transform.translation = convert::vec3(pose.translation);
        transform.rotation = convert::quat(facing);

        let animation = character.animation();
        let phase = animation.time(WALK_ANIMATION) * TAU;
        let bob = animation.weight(WALK_ANIMATION) * WALK_BOB_HEIGHT * phase.sin().abs();
        let head_local = facing.inverse() * head_look_rotation(facing, character.controls.pitch);

        for child in children.iter() {
            if let Ok(mut torso) = torsos.get_mut(child) {
                torso.translation.y = capsule.offset_y + bob;
            } else if let Ok(mut head) = heads.get_mut(child) {
                head.translation.y = capsule.height + HEAD_RADIUS * 0.5 + bob;
                head.rotation = convert::quat(head_local);
            }
        }
    }
}
