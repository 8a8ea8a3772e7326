//! Framebuffer readback for frame capture.
//!
//! Copies the rendered surface texture into a mappable staging buffer and
//! hands it to the CPU as tightly packed RGBA8 rows, top row first.

use std::sync::mpsc;

use crate::capture::{CapturedFrame, BYTES_PER_PIXEL};
use crate::error::GpuError;

/// Channel order of a readable 8-bit color format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

impl ChannelOrder {
    /// Channel order of `format`, or `None` if it cannot be captured.
    pub fn of(format: wgpu::TextureFormat) -> Option<Self> {
        match format {
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
                Some(Self::Rgba)
            }
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
                Some(Self::Bgra)
            }
            _ => None,
        }
    }
}

/// Row pitch of a `width`-pixel copy, rounded up to the copy alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL as u32;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip row padding and convert to RGBA.
pub fn unpack_rows(
    data: &[u8],
    width: u32,
    height: u32,
    padded_row: usize,
    order: ChannelOrder,
) -> Vec<u8> {
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    if row_bytes == 0 {
        return pixels;
    }
    for row in data.chunks(padded_row).take(height as usize) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }
    if order == ChannelOrder::Bgra {
        for px in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.swap(0, 2);
        }
    }
    pixels
}

/// Staging buffer sized for one frame.
pub struct FrameReadback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_row: u32,
    order: ChannelOrder,
}

impl FrameReadback {
    pub fn new(device: &wgpu::Device, width: u32, height: u32, order: ChannelOrder) -> Self {
        let padded_row = padded_bytes_per_row(width);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Readback Buffer"),
            size: padded_row as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            width,
            height,
            padded_row,
            order,
        }
    }

    /// Reallocate for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width != self.width || height != self.height {
            *self = Self::new(device, width, height, self.order);
        }
    }

    /// Record a copy of `texture` into the staging buffer.
    pub fn copy(&self, encoder: &mut wgpu::CommandEncoder, texture: &wgpu::Texture) {
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Map the staging buffer and unpack it (call after submit).
    pub fn read(&self, device: &wgpu::Device) -> Result<CapturedFrame, GpuError> {
        let slice = self.buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| GpuError::BufferMapping(e.to_string()))?
            .map_err(|e| GpuError::BufferMapping(e.to_string()))?;

        let pixels = {
            let data = slice.get_mapped_range();
            unpack_rows(
                &data,
                self.width,
                self.height,
                self.padded_row as usize,
                self.order,
            )
        };
        self.buffer.unmap();

        Ok(CapturedFrame {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}
