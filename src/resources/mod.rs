use crate::data_structures::model;

/**
 * Loading of the bundled mesh asset and creation of its GPU resources.
 */
pub mod mesh;

/// Directory the assets are looked up in, relative to the working directory.
pub const ASSET_DIR: &str = "assets";

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = std::path::Path::new("./").join(ASSET_DIR).join(file_name);
    let txt = tokio::fs::read_to_string(path).await?;
    Ok(txt)
}

/// Uploads parsed meshes and wraps them in a [`model::Model`] labelled `debug_group`.
pub fn model_from_mesh_data(
    meshes: &[mesh::MeshData],
    file_name: &str,
    debug_group: &str,
    device: &wgpu::Device,
    uniform_layout: &wgpu::BindGroupLayout,
) -> model::Model {
    let meshes = mesh::upload_meshes(meshes, file_name, device);
    log::info!(
        "Loaded {} with {} mesh(es), {} submesh(es)",
        file_name,
        meshes.len(),
        meshes.iter().map(|m| m.submeshes.len()).sum::<usize>()
    );
    model::Model::new(debug_group, meshes, device, uniform_layout)
}
