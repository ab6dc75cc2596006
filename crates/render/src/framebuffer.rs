//! Shared RGB framebuffer and its per-thread partitions
//!
//! Pixels are packed into `AtomicU32` cells and accessed with relaxed
//! ordering. Painters and the presenter race on individual pixels, which can
//! only tear between two complete colours, never within one.

use std::ops::Range;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::error::RenderError;

/// An 8-bit RGB pixel.
pub type Color = [u8; 3];

/// Write-only pixel target of a painter.
pub trait PixelSink {
    fn put_pixel(&mut self, x: u32, y: u32, color: Color);
}

fn pack(color: Color) -> u32 {
    u32::from_le_bytes([color[0], color[1], color[2], 0])
}

fn unpack(packed: u32) -> Color {
    let [r, g, b, _] = packed.to_le_bytes();
    [r, g, b]
}

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Box<[AtomicU32]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize;
        let pixels = (0..len).map(|_| AtomicU32::new(0)).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        Some(unpack(self.pixels[index].load(Ordering::Relaxed)))
    }

    pub fn clear(&self) {
        for pixel in self.pixels.iter() {
            pixel.store(0, Ordering::Relaxed);
        }
    }

    /// Cuts the pixel index space into `parts` contiguous, disjoint ranges
    /// that together cover the whole screen, one writer per range.
    pub fn split(self: &Arc<Self>, parts: usize) -> Vec<PartitionWriter> {
        let len = self.len();
        let parts = parts.clamp(1, len);
        (0..parts)
            .map(|i| PartitionWriter {
                framebuffer: Arc::clone(self),
                range: len * i / parts..len * (i + 1) / parts,
            })
            .collect()
    }

    /// A single writer over every pixel.
    pub fn writer(self: &Arc<Self>) -> PartitionWriter {
        PartitionWriter {
            framebuffer: Arc::clone(self),
            range: 0..self.len(),
        }
    }

    /// Row-major RGB snapshot.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| unpack(p.load(Ordering::Relaxed)))
            .collect()
    }

    /// Row-major RGBA snapshot with opaque alpha, ready for texture upload.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * 4);
        for pixel in self.pixels.iter() {
            let [r, g, b] = unpack(pixel.load(Ordering::Relaxed));
            out.extend_from_slice(&[r, g, b, u8::MAX]);
        }
        out
    }
}

/// Exclusive write access to one index range of a shared [`Framebuffer`].
pub struct PartitionWriter {
    framebuffer: Arc<Framebuffer>,
    range: Range<usize>,
}

impl PartitionWriter {
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn framebuffer(&self) -> &Arc<Framebuffer> {
        &self.framebuffer
    }
}

impl PixelSink for PartitionWriter {
    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        let fb = &self.framebuffer;
        let index = y as usize * fb.width as usize + x as usize;
        if x >= fb.width || !self.range.contains(&index) {
            warn!(x, y, range = ?self.range, "rejected write outside partition");
            return;
        }
        fb.pixels[index].store(pack(color), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Framebuffer::new(0, 10),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn partitions_cover_screen_without_overlap() {
        let fb = Arc::new(Framebuffer::new(37, 11).unwrap());
        for parts in [1, 2, 3, 8, 13] {
            let writers = fb.split(parts);
            assert_eq!(writers.len(), parts);
            let mut next = 0;
            for w in &writers {
                assert_eq!(w.range().start, next);
                next = w.range().end;
            }
            assert_eq!(next, fb.len());
        }
    }

    #[test]
    fn writer_stays_inside_its_range() {
        let fb = Arc::new(Framebuffer::new(4, 4).unwrap());
        let mut writers = fb.split(2);
        writers[0].put_pixel(1, 1, [9, 9, 9]);
        writers[0].put_pixel(1, 3, [7, 7, 7]);
        writers[1].put_pixel(3, 3, [5, 6, 7]);
        // x past the row end would alias pixel (1, 3)
        writers[1].put_pixel(5, 2, [1, 1, 1]);
        assert_eq!(fb.get(1, 1), Some([9, 9, 9]));
        assert_eq!(fb.get(3, 3), Some([5, 6, 7]));
        assert_eq!(fb.get(1, 3), Some([0, 0, 0]));
    }

    #[test]
    fn snapshots_are_row_major() {
        let fb = Arc::new(Framebuffer::new(2, 1).unwrap());
        fb.writer().put_pixel(1, 0, [1, 2, 3]);
        assert_eq!(fb.to_rgb(), vec![0, 0, 0, 1, 2, 3]);
        assert_eq!(fb.to_rgba(), vec![0, 0, 0, 255, 1, 2, 3, 255]);
    }
}
