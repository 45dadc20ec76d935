use egui::{Color32, ColorImage};

const SAMPLES_PER_SECOND: f64 = 50.0;
const MIN_WINDOW_SECONDS: f64 = 0.05;

const BACKGROUND: Color32 = Color32::from_rgb(24, 26, 30);

/// Synthetic per-instant activity levels rendered as a column chart, the
/// stand-in for whatever a real host would plot along its timeline.
pub(crate) struct StripModel {
    samples: Vec<f32>,
    seconds: f64,
    /// Visible part of the timeline, in seconds.
    window: (f64, f64),
}

impl StripModel {
    pub fn new(seconds: f64, seed: u64) -> Self {
        let seconds = seconds.max(1.0);
        let len = (seconds * SAMPLES_PER_SECOND) as usize;
        let mut state = seed | 1;
        let samples = (0..len)
            .map(|i| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let noise = (state >> 40) as f32 / (1u32 << 24) as f32;
                let wave = ((i as f32 / 80.0).sin() * 0.5 + 0.5) * 0.7;
                (noise * 0.3 + wave).min(1.0)
            })
            .collect();
        Self {
            samples,
            seconds,
            window: (0.0, seconds),
        }
    }

    pub fn window(&self) -> (f64, f64) {
        self.window
    }

    pub fn reset_window(&mut self) {
        self.window = (0.0, self.seconds);
    }

    /// Restricts the visible window, clamped to the timeline and kept at a
    /// minimum width so a zero-width selection cannot zoom into nothing.
    pub fn zoom_to(&mut self, start: f64, end: f64) {
        let a = start.clamp(0.0, self.seconds);
        let b = end.clamp(0.0, self.seconds);
        let mut start = a.min(b);
        let mut end = a.max(b);
        if end - start < MIN_WINDOW_SECONDS {
            end = (start + MIN_WINDOW_SECONDS).min(self.seconds);
            start = (end - MIN_WINDOW_SECONDS).max(0.0);
        }
        self.window = (start, end);
    }

    /// Time shown at pixel column `x` of a strip `width` columns wide.
    pub fn time_at(&self, x: i32, width: u32) -> f64 {
        let (start, end) = self.window;
        start + (end - start) * x as f64 / width.max(1) as f64
    }

    /// Pixel column showing `time` on a strip `width` columns wide.
    pub fn column_at(&self, time: f64, width: u32) -> i32 {
        let (start, end) = self.window;
        let frac = (time - start) / (end - start).max(f64::EPSILON);
        (frac * width as f64).round() as i32
    }

    /// Moves a column from a strip `old_width` wide onto one `new_width`
    /// wide so it keeps showing the same time.
    pub fn rescale_column(&self, x: i32, old_width: u32, new_width: u32) -> i32 {
        self.column_at(self.time_at(x, old_width), new_width)
    }

    fn level_between(&self, t0: f64, t1: f64) -> f32 {
        let len = self.samples.len();
        let to_index = |t: f64| {
            ((t / self.seconds) * len as f64)
                .floor()
                .clamp(0.0, len as f64 - 1.0) as usize
        };
        let lo = to_index(t0);
        let hi = to_index(t1).max(lo);
        self.samples[lo..=hi].iter().copied().fold(0.0, f32::max)
    }

    /// Renders the visible window as one bar column per pixel.
    pub fn render(&self, width: u32, height: u32) -> ColorImage {
        let w = width.max(1) as usize;
        let h = height.max(1) as usize;
        let mut pixels = vec![BACKGROUND; w * h];
        for x in 0..w {
            let t0 = self.time_at(x as i32, width);
            let t1 = self.time_at(x as i32 + 1, width);
            let level = self.level_between(t0, t1);
            let bar = (level * (h as f32 - 2.0)).max(0.0) as usize;
            for y in h - 1 - bar..h {
                pixels[y * w + x] = level_color(level);
            }
        }
        ColorImage {
            size: [w, h],
            pixels,
        }
    }
}

fn level_color(level: f32) -> Color32 {
    let level = level.clamp(0.0, 1.0);
    let r = (80.0 + 160.0 * level) as u8;
    let g = (180.0 - 80.0 * level) as u8;
    Color32::from_rgb(r, g, 64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_time_round_trip() {
        let mut strip = StripModel::new(60.0, 42);
        strip.zoom_to(10.0, 20.0);
        let t = strip.time_at(250, 500);
        assert!((t - 15.0).abs() < 1e-9);
        assert_eq!(strip.column_at(t, 500), 250);
    }

    #[test]
    fn rescale_keeps_the_column_on_its_time() {
        let mut strip = StripModel::new(60.0, 42);
        strip.zoom_to(10.0, 20.0);
        assert_eq!(strip.rescale_column(100, 400, 1000), 250);
        assert_eq!(strip.rescale_column(0, 400, 1000), 0);
    }

    #[test]
    fn zoom_clamps_to_the_timeline() {
        let mut strip = StripModel::new(60.0, 42);
        strip.zoom_to(-5.0, 999.0);
        assert_eq!(strip.window(), (0.0, 60.0));
    }

    #[test]
    fn zoom_keeps_a_minimum_window() {
        let mut strip = StripModel::new(60.0, 42);
        strip.zoom_to(30.0, 30.0);
        let (start, end) = strip.window();
        assert!(end - start >= MIN_WINDOW_SECONDS);
        assert!(start <= 30.0 && 30.0 <= end);
    }

    #[test]
    fn reset_restores_the_full_window() {
        let mut strip = StripModel::new(60.0, 42);
        strip.zoom_to(10.0, 20.0);
        strip.reset_window();
        assert_eq!(strip.window(), (0.0, 60.0));
    }

    #[test]
    fn render_matches_the_requested_size() {
        let strip = StripModel::new(60.0, 42);
        let image = strip.render(64, 32);
        assert_eq!(image.size, [64, 32]);
        assert_eq!(image.pixels.len(), 64 * 32);
    }

    #[test]
    fn render_draws_bars_over_the_background() {
        let strip = StripModel::new(60.0, 42);
        let image = strip.render(64, 32);
        assert!(image.pixels.iter().any(|p| *p != BACKGROUND));
    }
}
