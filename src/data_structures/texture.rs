//! Depth-stencil attachment backing the render pass.

/// A GPU texture together with its default view.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    /// Preferred depth-stencil format: 32-bit float depth and 8-bit stencil.
    pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32FloatStencil8;

    /// Used when the adapter lacks `DEPTH32FLOAT_STENCIL8`.
    pub const FALLBACK_DEPTH_STENCIL_FORMAT: wgpu::TextureFormat =
        wgpu::TextureFormat::Depth24PlusStencil8;

    /// Creates a depth-stencil texture usable as a `RENDER_ATTACHMENT`.
    ///
    /// Zero dimensions are clamped to one texel so a minimized window never
    /// produces an invalid descriptor.
    pub fn create_depth_texture(
        device: &wgpu::Device,
        size: [u32; 2],
        format: wgpu::TextureFormat,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }
}
