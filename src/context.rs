use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::data_structures::texture;

/// GPU device, queue and the window surface they draw to.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub depth_format: wgpu::TextureFormat,
    is_surface_configured: bool,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        // Backends::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("could not create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter is available")?;

        let (required_features, depth_format) = depth_stencil_support(adapter.features());
        log::info!("device and queue (depth format {:?})", depth_format);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Weld Device"),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("could not create the GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = preferred_surface_format(&surface_caps.formats)
            .context("the surface reports no supported formats")?;
        let present_mode = surface_caps
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            depth_format,
            "depth_texture",
        );

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            depth_format,
            is_surface_configured: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Reconfigures the surface and depth buffer. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.is_surface_configured = true;
        self.depth_texture = texture::Texture::create_depth_texture(
            &self.device,
            [width, height],
            self.depth_format,
            "depth_texture",
        );
        true
    }

    /// Next surface texture, or `None` when the window cannot be drawn to right now.
    pub fn acquire_drawable(&mut self) -> Option<wgpu::SurfaceTexture> {
        if !self.is_surface_configured {
            return None;
        }
        match self.surface.get_current_texture() {
            Ok(output) => Some(output),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(wgpu::SurfaceError::Timeout) => None,
            Err(e) => {
                log::error!("Unable to acquire a drawable: {}", e);
                None
            }
        }
    }

    /// Blocks until all submitted GPU work has finished.
    pub fn wait_for_gpu(&self) {
        if let Err(e) = self.device.poll(wgpu::PollType::Wait) {
            log::error!("Waiting for the GPU failed: {}", e);
        }
    }
}

/// BGRA sRGB first, then any sRGB format, then whatever comes first.
pub fn preferred_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| *f == wgpu::TextureFormat::Bgra8UnormSrgb)
        .or_else(|| formats.iter().copied().find(|f| f.is_srgb()))
        .or_else(|| formats.first().copied())
}

/// Features to request and the depth-stencil format they allow.
pub fn depth_stencil_support(adapter_features: wgpu::Features) -> (wgpu::Features, wgpu::TextureFormat) {
    if adapter_features.contains(wgpu::Features::DEPTH32FLOAT_STENCIL8) {
        (
            wgpu::Features::DEPTH32FLOAT_STENCIL8,
            texture::Texture::DEPTH_STENCIL_FORMAT,
        )
    } else {
        (
            wgpu::Features::empty(),
            texture::Texture::FALLBACK_DEPTH_STENCIL_FORMAT,
        )
    }
}
