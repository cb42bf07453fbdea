//! Offscreen rendering for frame capture.

use image::RgbaImage;

use super::{create_msaa_view, request_device, GlyphPipeline, Uniforms};
use crate::error::{GlyphsError, Result};
use crate::scene::Vertex;

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const BYTES_PER_PIXEL: u32 = 4; // RGBA8

/// Renders into a texture and reads the pixels back
pub struct HeadlessRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: GlyphPipeline,
    target: wgpu::Texture,
    target_view: wgpu::TextureView,
    msaa_view: wgpu::TextureView,
    readback: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
}

impl HeadlessRenderer {
    pub async fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphsError::Render(format!(
                "Cannot render a {}x{} canvas",
                width, height
            )));
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| GlyphsError::Render("Failed to find suitable GPU adapter".into()))?;

        let (device, queue) = request_device(&adapter).await?;

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Capture Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let msaa_view = create_msaa_view(&device, FORMAT, width, height);

        let unpadded_bytes_per_row = width * BYTES_PER_PIXEL;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Capture Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let pipeline = GlyphPipeline::new(&device, FORMAT, Uniforms::new(width, height));

        log::info!("Headless renderer ready: {}x{}", width, height);

        Ok(Self {
            device,
            queue,
            pipeline,
            target,
            target_view,
            msaa_view,
            readback,
            width,
            height,
            padded_bytes_per_row,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draw `vertices` and return the resolved pixels
    pub fn render_to_image(&mut self, vertices: &[Vertex]) -> Result<RgbaImage> {
        self.pipeline
            .update_vertices(&self.device, &self.queue, vertices);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Capture Encoder"),
            });
        self.pipeline
            .encode(&mut encoder, &self.msaa_view, &self.target_view);

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = self.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| GlyphsError::Render(format!("Readback channel closed: {}", e)))?
            .map_err(|e| GlyphsError::Render(format!("Failed to map capture buffer: {}", e)))?;

        let unpadded_bytes_per_row = (self.width * BYTES_PER_PIXEL) as usize;
        let mut image_data = vec![0u8; unpadded_bytes_per_row * self.height as usize];
        {
            let data = buffer_slice.get_mapped_range();

            // Remove padding
            for (y, row) in image_data.chunks_exact_mut(unpadded_bytes_per_row).enumerate() {
                let padded_offset = y * self.padded_bytes_per_row as usize;
                row.copy_from_slice(&data[padded_offset..padded_offset + unpadded_bytes_per_row]);
            }
        }
        self.readback.unmap();

        RgbaImage::from_raw(self.width, self.height, image_data)
            .ok_or_else(|| GlyphsError::Render("Captured frame has the wrong size".into()))
    }
}
