use std::ops::RangeInclusive;

use egui::{
    self, Color32, ColorImage, Pos2, Rect, Response, Sense, TextureHandle, TextureOptions,
    load::SizedTexture,
};
use egui_span_select::{
    DragMarker, InvertBuffer, PaintContext, PixelSpan, PointerPos, SelectionHost, SpanTracker,
};
use log::info;

use strip::StripModel;

mod config;
mod native;
mod strip;

pub(crate) use config::Config;
pub use native::run_native;

/// Strip geometry and gesture outcomes, lent to the tracker each frame.
struct TimelineHost {
    width: u32,
    /// Visible part of the timeline, in seconds.
    window: (f64, f64),
    committed: Option<PixelSpan>,
}

impl TimelineHost {
    fn time_of(&self, x: i32) -> f64 {
        let (start, end) = self.window;
        start + (end - start) * x as f64 / self.width.max(1) as f64
    }
}

impl SelectionHost for TimelineHost {
    type Model = RangeInclusive<f64>;

    fn x_bounds(&self) -> RangeInclusive<i32> {
        0..=self.width.saturating_sub(1) as i32
    }

    fn y_offset(&self) -> i32 {
        0
    }

    fn selection_finished(&mut self, span: PixelSpan) {
        info!("Selected columns {}..={}", span.min(), span.max());
        self.committed = Some(span);
    }

    fn selection_cleared(&mut self) {
        self.committed = None;
    }

    fn last_selection_model(&self) -> Option<RangeInclusive<f64>> {
        let span = self.committed?;
        Some(self.time_of(span.min())..=self.time_of(span.max()))
    }
}

pub(crate) struct TimelineApp {
    strip: StripModel,
    tracker: SpanTracker,
    host: TimelineHost,
    /// Rendered strip plus the inverted overlays, uploaded on change.
    image: ColorImage,
    // The handle keeps the texture alive; dropping it blanks the SizedTexture.
    texture: Option<(TextureHandle, SizedTexture)>,
    image_dirty: bool,
    texture_dirty: bool,
    /// The committed span is currently inverted into `image`.
    committed_shown: bool,
    strip_height: u32,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: crate::config::Config) -> Self {
        if let Some(scale) = config.egui.pixels_per_point {
            cc.egui_ctx.set_pixels_per_point(scale);
        }
        let strip = StripModel::new(config.strip.seconds, config.strip.seed);
        let window = strip.window();
        Self {
            strip,
            tracker: SpanTracker::new(config.tracker),
            host: TimelineHost {
                width: 0,
                window,
                committed: None,
            },
            image: ColorImage {
                size: [0, 0],
                pixels: Vec::new(),
            },
            texture: None,
            image_dirty: true,
            texture_dirty: false,
            committed_shown: false,
            strip_height: config.strip.height.max(16),
        }
    }

    fn overlay_height(&self) -> u32 {
        // invert fills cover one extra row
        self.strip_height.saturating_sub(1)
    }

    fn strip_pos(rect: Rect, pos: Pos2) -> PointerPos {
        PointerPos::from(pos - rect.min.to_vec2())
    }

    fn paint_span(&mut self, span: PixelSpan) {
        let height = self.overlay_height();
        let width = self.image.size[0];
        let mut surface = InvertBuffer::new(&mut self.image.pixels, width);
        let mut ctx = PaintContext::new(&mut self.host, &mut surface, height);
        self.tracker.paint_selection(&mut ctx, span);
        self.texture_dirty = true;
    }

    fn erase_committed_overlay(&mut self) {
        if !self.committed_shown {
            return;
        }
        if let Some(last) = self.tracker.last_selection() {
            self.paint_span(last);
        }
        self.committed_shown = false;
    }

    fn show_committed_overlay(&mut self) {
        if self.committed_shown || self.tracker.is_selecting() {
            return;
        }
        if let Some(last) = self.tracker.last_selection() {
            self.paint_span(last);
            self.committed_shown = true;
        }
    }

    /// Renders the strip from the model and restores whichever overlay was
    /// on it, since a render drops every painted rectangle.
    fn rebuild_image(&mut self) {
        self.image = self.strip.render(self.host.width, self.strip_height);
        self.committed_shown = false;
        {
            let height = self.overlay_height();
            let width = self.image.size[0];
            let mut surface = InvertBuffer::new(&mut self.image.pixels, width);
            let mut ctx = PaintContext::new(&mut self.host, &mut surface, height);
            self.tracker.repaint(&mut ctx);
        }
        self.show_committed_overlay();
        self.texture_dirty = true;
    }

    fn reload_texture(&mut self, ctx: &egui::Context) {
        let handle = ctx.load_texture(
            "strip",
            self.image.clone(),
            TextureOptions {
                magnification: egui::TextureFilter::Nearest,
                ..Default::default()
            },
        );
        let sized = SizedTexture::from_handle(&handle);
        self.texture = Some((handle, sized));
    }

    fn clear_selection(&mut self) {
        self.erase_committed_overlay();
        let height = self.overlay_height();
        let width = self.image.size[0];
        let mut surface = InvertBuffer::new(&mut self.image.pixels, width);
        let mut ctx = PaintContext::new(&mut self.host, &mut surface, height);
        self.tracker.clear_selection(&mut ctx);
        self.tracker.set_last_selection(None);
        self.texture_dirty = true;
    }

    fn zoom_to_selection(&mut self) {
        let Some(range) = self.host.last_selection_model() else {
            return;
        };
        info!("Zoom to {:.3}s..{:.3}s", range.start(), range.end());
        self.strip.zoom_to(*range.start(), *range.end());
        // the committed span is in the old pixel space
        self.tracker.set_last_selection(None);
        self.host.committed = None;
        self.committed_shown = false;
        self.image_dirty = true;
    }

    fn reset_zoom(&mut self) {
        self.strip.reset_window();
        self.tracker.set_last_selection(None);
        self.host.committed = None;
        self.committed_shown = false;
        self.image_dirty = true;
    }

    fn handle_events(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_selection();
        }
    }

    fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let has_selection = self.tracker.last_selection().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Zoom to selection"))
                .clicked()
            {
                self.zoom_to_selection();
            }
            if ui.button("Reset zoom").clicked() {
                self.reset_zoom();
            }
            if ui
                .add_enabled(
                    has_selection || self.tracker.is_selecting(),
                    egui::Button::new("Clear"),
                )
                .clicked()
            {
                self.clear_selection();
            }
        });
    }

    fn status_ui(&self, ui: &mut egui::Ui) {
        match (self.tracker.pending_span(), self.host.last_selection_model()) {
            (Some(span), _) => {
                ui.label(format!(
                    "Selecting: {:.2}s to {:.2}s",
                    self.host.time_of(span.min()),
                    self.host.time_of(span.max())
                ));
            }
            (None, Some(range)) => {
                ui.label(format!(
                    "Selected: {:.2}s to {:.2}s",
                    range.start(),
                    range.end()
                ));
            }
            (None, None) => {
                ui.label("Drag across the strip to select a time range");
            }
        }
        let (start, end) = self.strip.window();
        ui.label(format!("Window: {start:.2}s to {end:.2}s"));
    }

    fn handle_interaction(&mut self, rect: Rect, response: &Response) {
        let cursor = response
            .interact_pointer_pos()
            .map(|pos| Self::strip_pos(rect, pos));

        if response.drag_started()
            && let Some(p) = cursor
        {
            let marker = self.tracker.drag_marker_for_point(&self.host, p);
            if marker != DragMarker::None {
                self.tracker.set_dragged_marker(marker);
            } else {
                // a fresh gesture replaces the committed selection
                self.erase_committed_overlay();
                self.tracker.set_last_selection(None);
                self.host.committed = None;
            }
        }

        if self.tracker.dragged_marker() != DragMarker::None {
            self.resize_committed(response, cursor);
        } else if response.drag_started() || response.dragged() || response.drag_stopped() {
            let height = self.overlay_height();
            let width = self.image.size[0];
            let mut surface = InvertBuffer::new(&mut self.image.pixels, width);
            let mut ctx = PaintContext::new(&mut self.host, &mut surface, height);
            self.tracker.handle_drag_response(response, cursor, &mut ctx);
            self.texture_dirty = true;
            if response.drag_stopped() {
                self.show_committed_overlay();
            }
        }

        if let Some(hover) = response.hover_pos() {
            let marker = match self.tracker.dragged_marker() {
                DragMarker::None => self
                    .tracker
                    .drag_marker_for_point(&self.host, Self::strip_pos(rect, hover)),
                dragging => dragging,
            };
            if marker != DragMarker::None {
                response.ctx.set_cursor_icon(marker.cursor_icon());
            }
        }
    }

    fn resize_committed(&mut self, response: &Response, cursor: Option<PointerPos>) {
        if (response.drag_started() || response.dragged())
            && let Some(p) = cursor
            && self.tracker.is_valid(&self.host, p)
        {
            self.erase_committed_overlay();
            if let Some(updated) = self.tracker.drag_marker_to(p.x) {
                self.host.committed = Some(updated);
            }
            self.show_committed_overlay();
        }
        if response.drag_stopped() {
            self.tracker.set_dragged_marker(DragMarker::None);
            if let Some(span) = self.tracker.last_selection() {
                info!("Resized selection to columns {}..={}", span.min(), span.max());
            }
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_events(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Timeline span selector");
            self.menu_ui(ui);
            self.status_ui(ui);

            let width = (ui.available_width().floor() as u32).max(64);
            if width != self.host.width {
                // keep a committed selection on its time range when the
                // strip gets wider or narrower
                if let Some(span) = self.host.committed {
                    let span = PixelSpan::from_endpoints(
                        self.strip.rescale_column(span.min(), self.host.width, width),
                        self.strip.rescale_column(span.max(), self.host.width, width),
                    );
                    self.host.committed = Some(span);
                    self.tracker.set_last_selection(Some(span));
                }
                self.host.width = width;
                self.image_dirty = true;
            }
            self.host.window = self.strip.window();
            if self.image_dirty {
                self.image_dirty = false;
                self.rebuild_image();
            }

            let size = egui::Vec2::new(self.host.width as f32, self.strip_height as f32);
            let (rect, response) =
                ui.allocate_exact_size(size, Sense::hover().union(Sense::drag()));
            self.handle_interaction(rect, &response);

            if self.texture_dirty {
                self.texture_dirty = false;
                self.reload_texture(ui.ctx());
            }
            if let Some((_, texture)) = &self.texture {
                let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
                ui.painter().image(texture.id, rect, uv, Color32::WHITE);
            }

            if let Some(hover) = response.hover_pos() {
                let p = Self::strip_pos(rect, hover);
                if self.tracker.is_valid(&self.host, p) {
                    ui.label(format!("Cursor: {:.2}s", self.host.time_of(p.x)));
                }
            }
        });
    }
}
