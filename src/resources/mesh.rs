use std::io::{BufReader, Cursor};

use anyhow::{Context, bail};
use wgpu::util::DeviceExt;

use crate::data_structures::model::{self, ModelVertex};

/// CPU-side geometry of one OBJ object before it is uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub submeshes: Vec<SubmeshData>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmeshData {
    pub indices: Vec<u32>,
    pub topology: wgpu::PrimitiveTopology,
}

impl MeshData {
    pub fn topologies(&self) -> impl Iterator<Item = wgpu::PrimitiveTopology> + '_ {
        self.submeshes.iter().map(|submesh| submesh.topology)
    }
}

pub(crate) fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Parses OBJ text into meshes, ignoring any referenced materials.
pub fn parse_obj(obj_text: &str) -> anyhow::Result<Vec<MeshData>> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let (models, _) = tobj::load_obj_buf(&mut obj_reader, &obj_load_options(), |_| {
        tobj::MTLLoadResult::Ok((Vec::new(), Default::default()))
    })?;
    mesh_data_from_obj(&models)
}

/// Converts tobj objects into interleaved meshes.
///
/// Fails when the asset yields no drawable submesh at all.
pub fn mesh_data_from_obj(models: &[tobj::Model]) -> anyhow::Result<Vec<MeshData>> {
    let meshes: Vec<MeshData> = models
        .iter()
        .filter(|m| !m.mesh.indices.is_empty())
        .map(|m| {
            let vertices = (0..m.mesh.positions.len() / 3)
                .map(|i| ModelVertex {
                    position: [
                        m.mesh.positions[i * 3],
                        m.mesh.positions[i * 3 + 1],
                        m.mesh.positions[i * 3 + 2],
                    ],
                    normal: [
                        m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                        m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                    ],
                    tex_coords: [
                        m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                        1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                    ],
                })
                .collect::<Vec<_>>();
            MeshData {
                name: m.name.clone(),
                vertices,
                submeshes: vec![SubmeshData {
                    indices: m.mesh.indices.clone(),
                    topology: wgpu::PrimitiveTopology::TriangleList,
                }],
            }
        })
        .collect();

    if meshes.is_empty() {
        bail!("asset contains no submeshes");
    }
    for mesh in &meshes {
        let vertex_count = mesh.vertices.len() as u32;
        for submesh in &mesh.submeshes {
            if let Some(bad) = submesh.indices.iter().find(|&&i| i >= vertex_count) {
                bail!(
                    "mesh {} references vertex {} but only has {}",
                    mesh.name,
                    bad,
                    vertex_count
                );
            }
        }
    }
    Ok(meshes)
}

pub fn upload_meshes(meshes: &[MeshData], file_name: &str, device: &wgpu::Device) -> Vec<model::Mesh> {
    meshes
        .iter()
        .map(|m| {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Vertex Buffer", file_name)),
                contents: bytemuck::cast_slice(&m.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            let submeshes = m
                .submeshes
                .iter()
                .map(|submesh| model::Submesh {
                    index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{:?} Index Buffer", file_name)),
                        contents: bytemuck::cast_slice(&submesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                    index_count: submesh.indices.len() as u32,
                    index_format: wgpu::IndexFormat::Uint32,
                    topology: submesh.topology,
                })
                .collect();

            model::Mesh {
                name: m.name.clone(),
                vertex_buffer,
                submeshes,
            }
        })
        .collect()
}

/// Reads and parses an OBJ asset from the bundled `assets/` directory.
pub async fn load_mesh_data(file_name: &str) -> anyhow::Result<Vec<MeshData>> {
    let obj_text = super::load_string(file_name)
        .await
        .with_context(|| format!("could not read mesh asset {file_name}"))?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let (models, _) = tobj::load_obj_buf_async(&mut obj_reader, &obj_load_options(), |_| async {
        tobj::MTLLoadResult::Ok((Vec::new(), Default::default()))
    })
    .await
    .with_context(|| format!("could not parse mesh asset {file_name}"))?;
    mesh_data_from_obj(&models).with_context(|| format!("could not extract meshes from {file_name}"))
}
