//! Owns the GPU state and the models, and runs one frame per redraw.

use std::sync::Arc;

use anyhow::{Context as _, bail};
use cgmath::{Matrix4, SquareMatrix, Vector2};
use winit::window::Window;

use crate::{
    config::Config,
    context::Context,
    data_structures::model::{Model, ModelTransform},
    frame::{self, FrameHandler, FrameOutcome, FrameStats, InFlightLimiter},
    input::{self, ControllerSource, Gamepads, InputState, SharedInput},
    math,
    pipelines::Pipelines,
    resources,
};

/// Movement input is scaled down by this before it is added to the position.
pub const MOVEMENT_DIVISOR: f32 = 100.0;
/// Trigger rotation rate in `[-1, 1]` maps to this many degrees.
pub const ROTATION_DEGREES_PER_UNIT: f32 = 60.0;

/// Position the player has accumulated from movement input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub translation: Vector2<f32>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            translation: Vector2::new(0.0, 0.0),
        }
    }

    pub fn advance(&mut self, input: &InputState) {
        self.translation += input.player_movement / MOVEMENT_DIVISOR;
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Places a model from the player position and the input snapshot.
///
/// The matrices stay stale until the model is updated.
pub fn apply_player(player: &PlayerState, input: &InputState, transform: &mut ModelTransform) {
    transform.translation.x = player.translation.x;
    transform.translation.y = player.translation.y;
    transform.translation.z = input.camera_dolly;
    transform.rotation.y = input.player_rotation_y * ROTATION_DEGREES_PER_UNIT;
}

/// Projection for the given drawable size; `None` for a zero-sized drawable.
pub fn projection_for(width: u32, height: u32, config: &Config) -> Option<Matrix4<f32>> {
    if width == 0 || height == 0 {
        return None;
    }
    let aspect = width as f32 / height as f32;
    Some(math::perspective(
        math::degrees_to_radians(config.fov_y_degrees),
        aspect,
        config.near_z,
        config.far_z,
    ))
}

pub struct Renderer {
    pub ctx: Context,
    pipelines: Pipelines,
    models: Vec<Model>,
    projection: Matrix4<f32>,
    input: SharedInput,
    gamepads: Gamepads,
    controllers: Box<dyn ControllerSource>,
    player: PlayerState,
    limiter: InFlightLimiter,
    stats: FrameStats,
    config: Config,
}

impl Renderer {
    /// Creates device, pipeline and models. Every failure here is fatal.
    pub async fn new(window: Arc<Window>, config: Config) -> anyhow::Result<Self> {
        let ctx = Context::new(window)
            .await
            .context("Cannot create the GPU context")?;

        let meshes = resources::mesh::load_mesh_data(&config.asset).await?;
        let mut topologies: Vec<wgpu::PrimitiveTopology> = Vec::new();
        for topology in meshes.iter().flat_map(|m| m.topologies()) {
            if !topologies.contains(&topology) {
                topologies.push(topology);
            }
        }
        let pipelines = Pipelines::new(&ctx.device, ctx.config.format, ctx.depth_format, topologies);
        if pipelines.is_empty() {
            bail!("no render pipeline could be built for {}", config.asset);
        }

        let models = vec![resources::model_from_mesh_data(
            &meshes,
            &config.asset,
            &config.debug_group,
            &ctx.device,
            &pipelines.uniform_layout,
        )];

        let size = ctx.window.inner_size();
        let projection = projection_for(size.width, size.height, &config)
            .unwrap_or_else(Matrix4::identity);

        let controllers = input::controller_source(config.gamepads);
        let limiter = InFlightLimiter::new(config.max_frames_in_flight);

        log::info!("Renderer ready with {} model(s)", models.len());
        Ok(Self {
            ctx,
            pipelines,
            models,
            projection,
            input: SharedInput::new(),
            gamepads: Gamepads::new(),
            controllers,
            player: PlayerState::new(),
            limiter,
            stats: FrameStats::new(),
            config,
        })
    }

    /// Handle for input producers.
    pub fn input(&self) -> SharedInput {
        self.input.clone()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.ctx.resize(width, height) {
            return;
        }
        if let Some(projection) = projection_for(width, height, &self.config) {
            self.projection = projection;
        }
    }

    /// Runs one frame. Called once per display refresh.
    pub fn render(&mut self) -> FrameOutcome {
        let limiter = self.limiter.clone();
        let outcome = frame::run_frame(&limiter, self);
        self.stats.record(outcome);
        outcome
    }

    fn update_game_state(&mut self) {
        for event in self.controllers.poll() {
            self.gamepads.handle(event, &self.input);
        }

        let snapshot = self.input.snapshot();
        self.player.advance(&snapshot);
        for model in &mut self.models {
            apply_player(&self.player, &snapshot, &mut model.transform);
            model.update();
        }
    }

    fn encode(&self, view: &wgpu::TextureView) -> wgpu::CommandBuffer {
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for model in &self.models {
                model.draw(&self.ctx.queue, &mut render_pass, &self.pipelines, self.projection);
            }
        }
        encoder.finish()
    }
}

impl FrameHandler for Renderer {
    type Drawable = wgpu::SurfaceTexture;

    fn wait_for_gpu(&mut self) {
        self.ctx.wait_for_gpu();
    }

    fn update(&mut self) {
        self.update_game_state();
    }

    fn next_drawable(&mut self) -> Option<wgpu::SurfaceTexture> {
        self.ctx.acquire_drawable()
    }

    fn submit(&mut self, output: wgpu::SurfaceTexture, on_complete: Box<dyn FnOnce() + Send + 'static>) {
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let commands = self.encode(&view);
        self.ctx.queue.submit(std::iter::once(commands));
        self.ctx.queue.on_submitted_work_done(on_complete);
        self.ctx.window.pre_present_notify();
        output.present();
    }
}
