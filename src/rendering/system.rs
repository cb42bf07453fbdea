//! Window surface rendering.

use std::sync::Arc;

use winit::window::Window;

use super::{create_msaa_view, request_device, GlyphPipeline, Uniforms};
use crate::error::{GlyphsError, Result};
use crate::scene::Vertex;

/// Rendering system managing wgpu device, surface, and pipeline
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: GlyphPipeline,
    msaa_view: wgpu::TextureView,
}

impl RenderSystem {
    /// Create new rendering system
    ///
    /// `canvas` is the logical drawing size; the scene is stretched to
    /// whatever size the window ends up with.
    pub async fn new(window: Arc<Window>, canvas: (u32, u32)) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .map_err(|e| GlyphsError::Render(format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| GlyphsError::Render("Failed to find suitable GPU adapter".into()))?;

        let (device, queue) = request_device(&adapter).await?;

        // Palette colours are authored in display space, so skip the sRGB encode
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| GlyphsError::Render("Surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = GlyphPipeline::new(&device, format, Uniforms::new(canvas.0, canvas.1));
        let msaa_view = create_msaa_view(&device, format, config.width, config.height);

        log::info!(
            "Renderer ready: {}x{} surface, {:?}, canvas {}x{}",
            config.width,
            config.height,
            format,
            canvas.0,
            canvas.1
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            msaa_view,
        })
    }

    /// Reconfigure the surface after the window changed size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.msaa_view = create_msaa_view(&self.device, self.config.format, width, height);
    }

    /// Reconfigure with the current size (after a lost or outdated surface)
    pub fn reconfigure(&mut self) {
        self.resize(self.config.width, self.config.height);
    }

    /// Upload the frame's triangles and present them
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.pipeline
            .update_vertices(&self.device, &self.queue, vertices);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.pipeline.encode(&mut encoder, &self.msaa_view, &view);
        self.queue.submit(std::iter::once(encoder.finish()));

        output.present();
        Ok(())
    }
}
