//! Randomized progressive painter
//!
//! A painter owns one contiguous range of pixel indices. Each call shades a
//! number of pixels picked uniformly at random from that range and splashes
//! every result onto its four direct neighbours, so a sparse sample still
//! fills the screen. With the write cache on, a pixel is shaded at most once
//! per camera epoch and never splashed over once shaded; the image keeps
//! refining while the camera holds still.

use std::ops::Range;

use scene::Scene;
use tracing::debug;

use crate::framebuffer::{Color, PixelSink};
use crate::shader::Shader;

const LANES: usize = 8;
/// Random draws allowed per wanted pixel, in batches and single picks alike.
const DRAWS_PER_LANE: usize = 4;

pub struct Painter {
    width: u32,
    height: u32,
    region: Range<usize>,
    use_cache: bool,
    written: Vec<bool>,
    epoch: u64,
    rng: fastrand::Rng,
}

impl Painter {
    /// `region` is clipped to the screen.
    pub fn new(width: u32, height: u32, region: Range<usize>, cache: bool, seed: u64) -> Self {
        let len = width as usize * height as usize;
        let region = region.start.min(len)..region.end.min(len);
        let region = region.start..region.end.max(region.start);
        Self {
            width,
            height,
            written: vec![false; region.len()],
            region,
            use_cache: cache,
            epoch: 0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn region(&self) -> Range<usize> {
        self.region.clone()
    }

    /// Starts a new epoch when the camera version moved on. Returns whether
    /// the write cache was cleared.
    pub fn sync_epoch(&mut self, version: u64) -> bool {
        if version == self.epoch {
            return false;
        }
        debug!(from = self.epoch, to = version, region = ?self.region, "camera moved, clearing write cache");
        self.epoch = version;
        self.reset_write_cache();
        true
    }

    pub fn reset_write_cache(&mut self) {
        self.written.fill(false);
    }

    /// Shades up to `pixels` randomly chosen pixels one at a time, drawing at
    /// most `DRAWS_PER_LANE` picks per wanted pixel. Returns how many were
    /// actually shaded; cached picks are skipped.
    pub fn paint<S: Scene>(
        &mut self,
        shader: &Shader<'_, S>,
        sink: &mut impl PixelSink,
        pixels: usize,
    ) -> usize {
        if self.region.is_empty() {
            return 0;
        }
        let mut shaded = 0;
        for _ in 0..pixels.saturating_mul(DRAWS_PER_LANE) {
            if shaded == pixels {
                break;
            }
            let local = self.rng.usize(0..self.region.len());
            if self.use_cache && self.written[local] {
                continue;
            }
            let (x, y) = self.coords(local);
            let color = shader.render_pixel(x, y);
            if self.use_cache {
                self.written[local] = true;
            }
            self.splash(sink, x, y, color);
            shaded += 1;
        }
        shaded
    }

    /// Shades `batches` groups of eight pixels with the batched shader.
    /// Returns the number of pixels shaded.
    pub fn paint_simd<S: Scene>(
        &mut self,
        shader: &Shader<'_, S>,
        sink: &mut impl PixelSink,
        batches: usize,
    ) -> usize {
        if self.region.is_empty() {
            return 0;
        }
        let mut shaded = 0;
        for _ in 0..batches {
            let (picked, count) = self.draw_batch();
            if count == 0 {
                continue;
            }
            let last = picked[count - 1];
            let pixels: [(u32, u32); LANES] =
                std::array::from_fn(|i| self.coords(if i < count { picked[i] } else { last }));
            let colors = shader.render_batch(pixels);
            for i in 0..count {
                let (x, y) = pixels[i];
                self.splash(sink, x, y, colors[i]);
            }
            shaded += count;
        }
        shaded
    }

    /// Picks up to eight distinct uncached pixels with a bounded number of
    /// draws. With the cache on, picks are marked immediately so a batch
    /// never holds the same pixel twice.
    fn draw_batch(&mut self) -> ([usize; LANES], usize) {
        let mut picked = [0; LANES];
        let mut count = 0;
        for _ in 0..LANES * DRAWS_PER_LANE {
            if count == LANES {
                break;
            }
            let local = self.rng.usize(0..self.region.len());
            if self.use_cache {
                if self.written[local] {
                    continue;
                }
                self.written[local] = true;
            }
            picked[count] = local;
            count += 1;
        }
        (picked, count)
    }

    fn coords(&self, local: usize) -> (u32, u32) {
        let offset = self.region.start + local;
        let width = self.width as usize;
        ((offset % width) as u32, (offset / width) as u32)
    }

    /// Index into the write cache of screen pixel `(x, y)`, if it lies inside
    /// this painter's region.
    fn local_index(&self, x: u32, y: u32) -> Option<usize> {
        let offset = y as usize * self.width as usize + x as usize;
        self.region
            .contains(&offset)
            .then(|| offset - self.region.start)
    }

    fn splash(&self, sink: &mut impl PixelSink, x: u32, y: u32, color: Color) {
        sink.put_pixel(x, y, color);
        let neighbours = [
            (x > 0).then(|| (x - 1, y)),
            (y > 0).then(|| (x, y - 1)),
            (x + 1 < self.width).then(|| (x + 1, y)),
            (y + 1 < self.height).then(|| (x, y + 1)),
        ];
        for (nx, ny) in neighbours.into_iter().flatten() {
            match self.local_index(nx, ny) {
                Some(local) if !self.written[local] => sink.put_pixel(nx, ny, color),
                _ => {}
            }
        }
    }
}
