//! The three static scenes: a backdrop image plus a cloud of matcap-shaded
//! primitives scattered on the unit sphere.

use std::f32::consts::TAU;
use std::path::Path;

use anyhow::Result;
use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

use fader_engine::mesh::{box_mesh, sphere_mesh, torus_mesh, MeshData};
use fader_engine::render::passes::scene::{SceneBatch, SceneBatchDesc, ScenePass};
use fader_engine::render::{OffscreenTarget, Texture2d};

use crate::assets::{load_or_generate, Fallback};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    Torus { radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
}

impl Geometry {
    pub fn mesh(self) -> MeshData {
        match self {
            Geometry::Box { width, height, depth } => box_mesh(width, height, depth),
            Geometry::Torus { radius, tube, radial_segments, tubular_segments } => {
                torus_mesh(radius, tube, radial_segments, tubular_segments)
            }
            Geometry::Sphere { radius, width_segments, height_segments } => {
                sphere_mesh(radius, width_segments, height_segments)
            }
        }
    }
}

/// Static description of one scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneSpec {
    pub background: &'static str,
    pub matcap: &'static str,
    pub geometry: Geometry,
    pub background_fallback: Fallback,
    pub matcap_fallback: Fallback,
}

pub const SCENES: [SceneSpec; 3] = [
    SceneSpec {
        background: "bg.jpg",
        matcap: "red.png",
        geometry: Geometry::Box { width: 0.1, height: 0.1, depth: 0.1 },
        background_fallback: Fallback::Background { top: [236, 224, 214], bottom: [164, 96, 86] },
        matcap_fallback: Fallback::Matcap { tint: [214, 48, 40] },
    },
    SceneSpec {
        background: "bg1.jpg",
        matcap: "gray.png",
        geometry: Geometry::Torus {
            radius: 0.3,
            tube: 0.05,
            radial_segments: 50,
            tubular_segments: 10,
        },
        background_fallback: Fallback::Background { top: [226, 228, 232], bottom: [92, 96, 108] },
        matcap_fallback: Fallback::Matcap { tint: [150, 150, 156] },
    },
    SceneSpec {
        background: "bg2.jpg",
        matcap: "green.png",
        geometry: Geometry::Sphere { radius: 0.1, width_segments: 29, height_segments: 20 },
        background_fallback: Fallback::Background { top: [222, 236, 216], bottom: [70, 120, 86] },
        matcap_fallback: Fallback::Matcap { tint: [52, 176, 84] },
    },
];

/// Uniformly distributed unit vector.
///
/// Samples `z` uniformly in [-1, 1] and an azimuth in [0, 2π); by
/// Archimedes' hat-box theorem this is uniform on the sphere.
pub fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let z = (rng.random::<f32>() - 0.5) * 2.0;
    let theta = rng.random::<f32>() * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// `count` model matrices on the unit sphere with random x/y rotations in
/// [0, 1) radians.
pub fn scatter_instances<R: Rng>(rng: &mut R, count: usize) -> Vec<Mat4> {
    (0..count)
        .map(|_| {
            let position = random_direction(rng);
            let rx = rng.random::<f32>();
            let ry = rng.random::<f32>();
            Mat4::from_translation(position) * Mat4::from_euler(EulerRot::XYZ, rx, ry, 0.0)
        })
        .collect()
}

/// A built scene: GPU batch plus the target it renders into.
pub struct Scene {
    pub batch: SceneBatch,
    pub target: OffscreenTarget,
}

/// All scenes, built once at startup.
pub struct SceneSet {
    scenes: Vec<Scene>,
}

impl SceneSet {
    #[allow(clippy::too_many_arguments)]
    pub fn build<R: Rng>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pass: &ScenePass,
        asset_dir: &Path,
        instances_per_scene: usize,
        target_size: (u32, u32),
        rng: &mut R,
    ) -> Result<Self> {
        let mut scenes = Vec::with_capacity(SCENES.len());

        for (i, spec) in SCENES.iter().enumerate() {
            let background = load_or_generate(asset_dir, spec.background, spec.background_fallback)?;
            let matcap = load_or_generate(asset_dir, spec.matcap, spec.matcap_fallback)?;

            let background = Texture2d::from_image(device, queue, &background, spec.background);
            let matcap = Texture2d::from_image(device, queue, &matcap, spec.matcap);
            let mesh = spec.geometry.mesh();
            let instances = scatter_instances(rng, instances_per_scene);

            let label = format!("fader scene {i}");
            let batch = pass.create_batch(
                device,
                SceneBatchDesc {
                    label: &label,
                    background: &background,
                    matcap: &matcap,
                    mesh: &mesh,
                    instances: &instances,
                },
            );
            let target = OffscreenTarget::new(device, target_size, label);

            scenes.push(Scene { batch, target });
        }

        log::info!(
            "built {} scenes ({} instances each) from {}",
            scenes.len(),
            instances_per_scene,
            asset_dir.display()
        );
        Ok(Self { scenes })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Resizes every target; returns `true` if any was reallocated.
    pub fn ensure_target_size(&mut self, device: &wgpu::Device, size: (u32, u32)) -> bool {
        let mut changed = false;
        for scene in &mut self.scenes {
            changed |= scene.target.ensure_size(device, size);
        }
        changed
    }
}
