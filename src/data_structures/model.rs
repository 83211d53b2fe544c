//! The single drawable entity of the demo: mesh geometry plus a transform.
//!
//! A [`Model`] owns GPU buffers for each [`Mesh`] loaded from the asset and a
//! small uniform buffer carrying the [`Uniforms`] payload. The transform math
//! lives in [`ModelTransform`] so that it can be driven and inspected without
//! a GPU.

use cgmath::{Matrix4, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::{math, pipelines::Pipelines};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Interleaved vertex: position, normal, texture coordinate (8 floats).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Payload bound at `@group(0) @binding(1)` for every draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn new(model_view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            model_view: model_view.into(),
            projection: projection.into(),
        }
    }
}

/// A contiguous indexed-draw range sharing one primitive topology.
#[derive(Debug)]
pub struct Submesh {
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
    pub topology: wgpu::PrimitiveTopology,
}

#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub submeshes: Vec<Submesh>,
}

/// Transform parameters of a model and the matrices derived from them.
///
/// The cached matrices only change in [`ModelTransform::update`]; writing the
/// parameters leaves them stale until the next update.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelTransform {
    pub scale: Vector3<f32>,
    /// Euler angles in degrees, applied Z * Y * X.
    pub rotation: Vector3<f32>,
    pub translation: Vector3<f32>,
    /// Yaw of the view in degrees.
    pub view_rotation_y: f32,
    pub view_translation: Vector3<f32>,
    model_matrix: Matrix4<f32>,
    view_matrix: Matrix4<f32>,
    model_view_matrix: Matrix4<f32>,
}

impl ModelTransform {
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            translation: Vector3::new(0.0, 0.0, 0.0),
            view_rotation_y: 0.0,
            view_translation: Vector3::new(0.0, 0.0, 0.0),
            model_matrix: Matrix4::identity(),
            view_matrix: Matrix4::identity(),
            model_view_matrix: Matrix4::identity(),
        }
    }

    /// Recomputes model, view and model-view matrices.
    ///
    /// Scale and rotation are composed first so they pivot around the local
    /// origin; the translation is applied last.
    pub fn update(&mut self) {
        let scale = math::scale(self.scale.x, self.scale.y, self.scale.z);
        let rotation = math::rotation(
            math::degrees_to_radians(self.rotation.z),
            Vector3::unit_z(),
        ) * math::rotation(
            math::degrees_to_radians(self.rotation.y),
            Vector3::unit_y(),
        ) * math::rotation(
            math::degrees_to_radians(self.rotation.x),
            Vector3::unit_x(),
        );
        let translation = math::translation(
            self.translation.x,
            self.translation.y,
            self.translation.z,
        );
        self.model_matrix = translation * (scale * rotation);

        let view_rotation = math::rotation(
            math::degrees_to_radians(self.view_rotation_y),
            Vector3::unit_y(),
        );
        let view_translation = math::translation(
            self.view_translation.x,
            self.view_translation.y,
            self.view_translation.z,
        );
        self.view_matrix = view_rotation * view_translation;

        self.model_view_matrix = self.view_matrix * self.model_matrix;
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model_matrix
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn model_view_matrix(&self) -> Matrix4<f32> {
        self.model_view_matrix
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded mesh together with its transform and uniform binding.
#[derive(Debug)]
pub struct Model {
    /// Used as the debug group label around the model's draws.
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: ModelTransform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Model {
    pub fn new(
        name: &str,
        meshes: Vec<Mesh>,
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let uniforms = Uniforms::new(Matrix4::identity(), Matrix4::identity());
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 1,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(&format!("{name} Uniform Bind Group")),
        });

        Self {
            name: name.to_string(),
            meshes,
            transform: ModelTransform::new(),
            uniform_buffer,
            bind_group,
        }
    }

    pub fn update(&mut self) {
        self.transform.update();
    }

    /// Uploads `{model-view, projection}` and records one indexed draw per submesh.
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipelines: &Pipelines,
        projection: Matrix4<f32>,
    ) {
        let uniforms = Uniforms::new(self.transform.model_view_matrix(), projection);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        render_pass.draw_model(self, pipelines);
    }
}

pub trait DrawModel {
    fn draw_mesh(&mut self, mesh: &Mesh, pipelines: &Pipelines);
    fn draw_model(&mut self, model: &Model, pipelines: &Pipelines);
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh, pipelines: &Pipelines) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        for submesh in &mesh.submeshes {
            match pipelines.for_topology(submesh.topology) {
                Some(pipeline) => self.set_pipeline(pipeline),
                None => {
                    log::warn!(
                        "No pipeline for {:?}, skipping a submesh of {}",
                        submesh.topology,
                        mesh.name
                    );
                    continue;
                }
            }
            self.set_index_buffer(submesh.index_buffer.slice(..), submesh.index_format);
            self.draw_indexed(0..submesh.index_count, 0, 0..1);
        }
    }

    fn draw_model(&mut self, model: &Model, pipelines: &Pipelines) {
        self.push_debug_group(&model.name);
        self.set_bind_group(0, &model.bind_group, &[]);
        for mesh in &model.meshes {
            self.draw_mesh(mesh, pipelines);
        }
        self.pop_debug_group();
    }
}
