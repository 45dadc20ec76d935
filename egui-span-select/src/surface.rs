use egui::Color32;
use itertools::Itertools;

/// Rectangle touched by an overlay pass, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl OverlayRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    // Merge when the row ranges match and the column ranges touch.
    fn merged(self, other: Self) -> Result<Self, (Self, Self)> {
        let same_rows = self.y == other.y && self.height == other.height;
        let (a0, a1) = (self.x, self.x + self.width as i32);
        let (b0, b1) = (other.x, other.x + other.width as i32);
        if same_rows && a0 <= b1 && b0 <= a1 {
            let x = a0.min(b0);
            Ok(Self {
                x,
                y: self.y,
                width: (a1.max(b1) - x) as u32,
                height: self.height,
            })
        } else {
            Err((self, other))
        }
    }
}

/// Where selection overlays are painted.
///
/// Implementations promise that two identical `invert_fill` calls cancel
/// out. The tracker relies on that to erase a stale rectangle without
/// asking the host to redraw anything underneath it.
pub trait OverlaySurface {
    fn invert_fill(&mut self, rect: OverlayRect, color: [u8; 3]);
}

/// Invert painting over a borrowed row-major `Color32` buffer, typically
/// the pixels of an `egui::ColorImage` before it is uploaded.
///
/// Fills XOR the RGB channels with the color and leave alpha untouched,
/// so they are meant for opaque surfaces. Rectangles reaching outside the
/// buffer are clipped.
pub struct InvertBuffer<'a> {
    pixels: &'a mut [Color32],
    width: usize,
}

impl<'a> InvertBuffer<'a> {
    pub fn new(pixels: &'a mut [Color32], width: usize) -> Self {
        debug_assert!(width == 0 || pixels.len() % width == 0);
        Self { pixels, width }
    }

    fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.pixels.len() / self.width
        }
    }
}

impl OverlaySurface for InvertBuffer<'_> {
    fn invert_fill(&mut self, rect: OverlayRect, color: [u8; 3]) {
        let cols = self.width as i64;
        let rows = self.rows() as i64;
        let x0 = (rect.x as i64).clamp(0, cols) as usize;
        let x1 = (rect.x as i64 + rect.width as i64).clamp(x0 as i64, cols) as usize;
        let y0 = (rect.y as i64).clamp(0, rows) as usize;
        let y1 = (rect.y as i64 + rect.height as i64).clamp(y0 as i64, rows) as usize;
        let [r, g, b] = color;
        for row in y0..y1 {
            let base = row * self.width;
            for px in &mut self.pixels[base + x0..base + x1] {
                *px = Color32::from_rgba_premultiplied(px.r() ^ r, px.g() ^ g, px.b() ^ b, px.a());
            }
        }
    }
}

/// Records the rectangles an overlay pass touched instead of painting
/// them. Retained-mode hosts drain the regions and repaint those parts
/// from their own model, which replaces invert-erase entirely.
#[derive(Debug, Default)]
pub struct DirtyRegions {
    regions: Vec<OverlayRect>,
}

impl DirtyRegions {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Drains the recorded rectangles, merging neighbors that share rows.
    pub fn take(&mut self) -> Vec<OverlayRect> {
        self.regions.drain(..).coalesce(OverlayRect::merged).collect()
    }
}

impl OverlaySurface for DirtyRegions {
    fn invert_fill(&mut self, rect: OverlayRect, _color: [u8; 3]) {
        if !rect.is_empty() {
            self.regions.push(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkered(width: usize, height: usize) -> Vec<Color32> {
        (0..width * height)
            .map(|i| Color32::from_rgb((i * 7) as u8, (i * 13) as u8, (i * 29) as u8))
            .collect()
    }

    #[test]
    fn invert_twice_restores_pixels() {
        let mut pixels = checkered(8, 6);
        let original = pixels.clone();
        let rect = OverlayRect {
            x: 2,
            y: 1,
            width: 4,
            height: 3,
        };
        let mut buffer = InvertBuffer::new(&mut pixels, 8);
        buffer.invert_fill(rect, [255, 255, 255]);
        buffer.invert_fill(rect, [255, 255, 255]);
        assert_eq!(pixels, original);
    }

    #[test]
    fn invert_white_over_black_is_white() {
        let mut pixels = vec![Color32::BLACK; 4];
        let mut buffer = InvertBuffer::new(&mut pixels, 4);
        buffer.invert_fill(
            OverlayRect {
                x: 1,
                y: 0,
                width: 2,
                height: 1,
            },
            [255, 255, 255],
        );
        assert_eq!(
            pixels,
            vec![Color32::BLACK, Color32::WHITE, Color32::WHITE, Color32::BLACK]
        );
    }

    #[test]
    fn invert_keeps_alpha() {
        let mut pixels = vec![Color32::from_rgba_premultiplied(10, 20, 30, 128)];
        let mut buffer = InvertBuffer::new(&mut pixels, 1);
        buffer.invert_fill(
            OverlayRect {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            },
            [255, 255, 255],
        );
        assert_eq!(pixels[0].a(), 128);
    }

    #[test]
    fn fill_clips_to_buffer() {
        let mut pixels = vec![Color32::BLACK; 16];
        let mut buffer = InvertBuffer::new(&mut pixels, 4);
        buffer.invert_fill(
            OverlayRect {
                x: -2,
                y: -2,
                width: 4,
                height: 4,
            },
            [255, 255, 255],
        );
        let white = pixels.iter().filter(|p| **p == Color32::WHITE).count();
        assert_eq!(white, 4);
        assert_eq!(pixels[0], Color32::WHITE);
        assert_eq!(pixels[1], Color32::WHITE);
        assert_eq!(pixels[4], Color32::WHITE);
        assert_eq!(pixels[5], Color32::WHITE);
    }

    #[test]
    fn fill_outside_buffer_changes_nothing() {
        let mut pixels = vec![Color32::BLACK; 16];
        let mut buffer = InvertBuffer::new(&mut pixels, 4);
        buffer.invert_fill(
            OverlayRect {
                x: 100,
                y: 0,
                width: 4,
                height: 4,
            },
            [255, 255, 255],
        );
        assert!(pixels.iter().all(|p| *p == Color32::BLACK));
    }

    #[test]
    fn dirty_regions_merge_touching_rows() {
        let mut regions = DirtyRegions::default();
        regions.invert_fill(
            OverlayRect {
                x: 10,
                y: 0,
                width: 40,
                height: 21,
            },
            [255, 255, 255],
        );
        regions.invert_fill(
            OverlayRect {
                x: 10,
                y: 0,
                width: 60,
                height: 21,
            },
            [255, 255, 255],
        );
        assert_eq!(
            regions.take(),
            vec![OverlayRect {
                x: 10,
                y: 0,
                width: 60,
                height: 21,
            }]
        );
        assert!(regions.is_empty());
    }

    #[test]
    fn dirty_regions_keep_disjoint_rects() {
        let mut regions = DirtyRegions::default();
        regions.invert_fill(
            OverlayRect {
                x: 0,
                y: 0,
                width: 10,
                height: 21,
            },
            [255, 255, 255],
        );
        regions.invert_fill(
            OverlayRect {
                x: 50,
                y: 0,
                width: 10,
                height: 21,
            },
            [255, 255, 255],
        );
        assert_eq!(regions.take().len(), 2);
    }

    #[test]
    fn dirty_regions_skip_empty_rects() {
        let mut regions = DirtyRegions::default();
        regions.invert_fill(
            OverlayRect {
                x: 5,
                y: 0,
                width: 0,
                height: 21,
            },
            [255, 255, 255],
        );
        assert!(regions.is_empty());
    }
}
