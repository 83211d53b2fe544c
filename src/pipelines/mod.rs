//! Fixed render pipeline of the demo.
//!
//! wgpu bakes the primitive topology into the pipeline state, so one pipeline
//! is built for every topology found in the loaded meshes. The OBJ loader
//! only yields triangle lists; line and strip submeshes come from
//! [`MeshData`](crate::resources::mesh::MeshData) built by the caller.

use std::collections::HashMap;

pub mod basic;

#[derive(Debug)]
pub struct Pipelines {
    by_topology: HashMap<wgpu::PrimitiveTopology, wgpu::RenderPipeline>,
    pub uniform_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        topologies: impl IntoIterator<Item = wgpu::PrimitiveTopology>,
    ) -> Self {
        let uniform_layout = basic::mk_uniform_layout(device);
        let by_topology = topologies
            .into_iter()
            .map(|topology| {
                let pipeline = basic::mk_basic_pipeline(
                    device,
                    &uniform_layout,
                    color_format,
                    depth_format,
                    topology,
                );
                (topology, pipeline)
            })
            .collect();
        Self {
            by_topology,
            uniform_layout,
        }
    }

    pub fn for_topology(&self, topology: wgpu::PrimitiveTopology) -> Option<&wgpu::RenderPipeline> {
        self.by_topology.get(&topology)
    }

    pub fn is_empty(&self) -> bool {
        self.by_topology.is_empty()
    }
}
