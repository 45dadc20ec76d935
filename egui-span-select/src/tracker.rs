use std::ops::RangeInclusive;

use log::debug;

use crate::{OverlayRect, OverlaySurface, PixelSpan, PointerPos};

/// Hit tolerance around a committed selection's edges, in pixels.
pub const DRAG_RADIUS_IN_PIXELS: i32 = 10;

/// Capabilities the owning widget lends to the tracker: where pointer
/// positions are valid, where to paint, and what to do when a gesture
/// ends.
pub trait SelectionHost {
    /// Domain value a committed span designates, e.g. a time interval.
    type Model;

    /// Inclusive range of valid pointer x coordinates.
    fn x_bounds(&self) -> RangeInclusive<i32>;

    /// Top edge of the painted rectangle.
    fn y_offset(&self) -> i32;

    /// A drag finished and committed `span`.
    fn selection_finished(&mut self, span: PixelSpan);

    /// The selection was abandoned.
    fn selection_cleared(&mut self);

    /// Maps the host's committed selection to a domain value. The tracker
    /// never calls this; hosts implement it for their own consumers, from
    /// whatever they recorded in [`SelectionHost::selection_finished`].
    fn last_selection_model(&self) -> Option<Self::Model>;
}

/// Which edge of the committed selection a pointer drag grabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragMarker {
    #[default]
    None,
    Start,
    End,
}

/// Overlay color and marker hit radius.
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerSettings {
    pub color: [u8; 3],
    pub drag_radius: i32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            drag_radius: DRAG_RADIUS_IN_PIXELS,
        }
    }
}

/// Everything a painting operation needs from the surrounding widget.
#[non_exhaustive]
pub struct PaintContext<'a, H: SelectionHost> {
    pub host: &'a mut H,
    pub surface: &'a mut dyn OverlaySurface,
    /// Height of the painted rectangle, minus the one extra row every
    /// fill adds to cover the bottom pixel line.
    pub height: u32,
}

impl<'a, H: SelectionHost> PaintContext<'a, H> {
    pub fn new(host: &'a mut H, surface: &'a mut dyn OverlaySurface, height: u32) -> Self {
        Self {
            host,
            surface,
            height,
        }
    }
}

/// Tracks one horizontal drag-selection gesture over a pixel range and
/// keeps an inverted overlay rectangle in sync while it runs.
///
/// Painting goes through [`OverlaySurface::invert_fill`], so erasing a
/// stale rectangle is repainting it. Hosts only have to forward pointer
/// events and repaint the overlay after redrawing their background.
pub struct SpanTracker {
    drag_start: Option<i32>,
    // Never set while drag_start is None.
    drag_end: Option<i32>,
    // An inverted rectangle is on the surface and must be repainted away
    // before the endpoints change.
    marked: bool,
    last_selection: Option<PixelSpan>,
    dragged_marker: DragMarker,
    settings: TrackerSettings,
}

impl Default for SpanTracker {
    fn default() -> Self {
        Self::new(TrackerSettings::default())
    }
}

impl SpanTracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            drag_start: None,
            drag_end: None,
            marked: false,
            last_selection: None,
            dragged_marker: DragMarker::None,
            settings,
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// A gesture is running, possibly still without a second endpoint.
    pub fn is_selecting(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Both endpoints of the running gesture exist.
    pub fn is_selection_available(&self) -> bool {
        self.drag_start.is_some() && self.drag_end.is_some()
    }

    /// Normalized span of the running gesture, once both endpoints exist.
    pub fn pending_span(&self) -> Option<PixelSpan> {
        match (self.drag_start, self.drag_end) {
            (Some(a), Some(b)) => Some(PixelSpan::from_endpoints(a, b)),
            _ => None,
        }
    }

    pub fn last_selection(&self) -> Option<PixelSpan> {
        self.last_selection
    }

    pub fn set_last_selection(&mut self, span: Option<PixelSpan>) {
        self.last_selection = span;
    }

    pub fn dragged_marker(&self) -> DragMarker {
        self.dragged_marker
    }

    pub fn set_dragged_marker(&mut self, marker: DragMarker) {
        self.dragged_marker = marker;
    }

    /// Whether `p` lies inside the host's selectable range.
    pub fn is_valid<H: SelectionHost>(&self, host: &H, p: PointerPos) -> bool {
        host.x_bounds().contains(&p.x)
    }

    pub fn is_close_to_last_start<H: SelectionHost>(&self, host: &H, p: PointerPos) -> bool {
        match self.last_selection {
            Some(last) if self.is_valid(host, p) => {
                (last.min() - p.x).abs() <= self.settings.drag_radius
            }
            _ => false,
        }
    }

    pub fn is_close_to_last_end<H: SelectionHost>(&self, host: &H, p: PointerPos) -> bool {
        match self.last_selection {
            Some(last) if self.is_valid(host, p) => {
                (last.max() - p.x).abs() <= self.settings.drag_radius
            }
            _ => false,
        }
    }

    /// Which edge of the committed selection `p` grabs. The start edge is
    /// tested first, so it wins when the span is narrower than twice the
    /// hit radius.
    pub fn drag_marker_for_point<H: SelectionHost>(&self, host: &H, p: PointerPos) -> DragMarker {
        if self.is_close_to_last_start(host, p) {
            DragMarker::Start
        } else if self.is_close_to_last_end(host, p) {
            DragMarker::End
        } else {
            DragMarker::None
        }
    }

    /// Moves the edge named by the dragged marker to `x`, reordering the
    /// edges when the drag crossed the opposite one. Returns the updated
    /// committed span.
    pub fn drag_marker_to(&mut self, x: i32) -> Option<PixelSpan> {
        let last = self.last_selection?;
        let updated = match self.dragged_marker {
            DragMarker::None => return None,
            DragMarker::Start => last.with_min(x),
            DragMarker::End => last.with_max(x),
        }
        .normalized();
        self.last_selection = Some(updated);
        Some(updated)
    }

    /// Feeds a pointer move into the gesture. Out-of-bounds points change
    /// nothing. The first valid point arms the gesture without painting;
    /// every later one moves the second endpoint.
    pub fn update_selection<H: SelectionHost>(
        &mut self,
        p: PointerPos,
        ctx: &mut PaintContext<'_, H>,
    ) {
        if !self.is_valid(ctx.host, p) {
            return;
        }
        if self.drag_start.is_none() {
            self.drag_start = Some(p.x);
        } else {
            self.update_drag_end(Some(p.x), ctx);
        }
    }

    /// Replaces the second endpoint, erasing the previous rectangle and
    /// painting the new one. `None` erases only and leaves the gesture
    /// armed. Ignored while no gesture is running.
    pub fn update_drag_end<H: SelectionHost>(
        &mut self,
        new_end: Option<i32>,
        ctx: &mut PaintContext<'_, H>,
    ) {
        let Some(start) = self.drag_start else {
            return;
        };
        self.erase_marked(ctx);
        if let Some(end) = new_end {
            self.invert_span(ctx, PixelSpan::from_endpoints(start, end));
            self.marked = true;
        }
        self.drag_end = new_end;
    }

    /// Finalizes the gesture: commits the span, notifies the host and
    /// erases the overlay. A release outside the bounds (or without a
    /// pointer position) commits the last recorded endpoint instead. A
    /// gesture that never produced a second endpoint is cleared.
    pub fn stop_selecting<H: SelectionHost>(
        &mut self,
        p: Option<PointerPos>,
        ctx: &mut PaintContext<'_, H>,
    ) {
        let (Some(start), Some(drag_end)) = (self.drag_start, self.drag_end) else {
            self.clear_selection(ctx);
            return;
        };
        let end = match p {
            Some(p) if self.is_valid(ctx.host, p) => p.x,
            _ => drag_end,
        };
        let span = PixelSpan::from_endpoints(start, end);
        debug!("Selection finished: {span:?}");
        self.last_selection = Some(span);
        ctx.host.selection_finished(span);
        self.erase_marked(ctx);
        self.drag_start = None;
        self.drag_end = None;
    }

    /// Erases any painted rectangle, resets the gesture and notifies the
    /// host. Callable in any state.
    pub fn clear_selection<H: SelectionHost>(&mut self, ctx: &mut PaintContext<'_, H>) {
        self.erase_marked(ctx);
        self.drag_start = None;
        self.drag_end = None;
        debug!("Selection cleared");
        ctx.host.selection_cleared();
    }

    /// Repaints the running gesture's rectangle after the host redrew its
    /// background, e.g. on an expose or resize. Must not be called while
    /// the previous rectangle is still on the surface.
    pub fn repaint<H: SelectionHost>(&mut self, ctx: &mut PaintContext<'_, H>) {
        if let (Some(a), Some(b)) = (self.drag_start, self.drag_end) {
            self.invert_span(ctx, PixelSpan::from_endpoints(a, b));
            self.marked = true;
        }
    }

    /// Paints an externally supplied span, typically the committed
    /// selection shown outside a running gesture. Painting it a second
    /// time erases it.
    pub fn paint_selection<H: SelectionHost>(
        &self,
        ctx: &mut PaintContext<'_, H>,
        span: PixelSpan,
    ) {
        self.invert_span(ctx, span);
    }

    fn erase_marked<H: SelectionHost>(&mut self, ctx: &mut PaintContext<'_, H>) {
        if !self.marked {
            return;
        }
        if let (Some(a), Some(b)) = (self.drag_start, self.drag_end) {
            self.invert_span(ctx, PixelSpan::from_endpoints(a, b));
        }
        self.marked = false;
    }

    fn invert_span<H: SelectionHost>(&self, ctx: &mut PaintContext<'_, H>, span: PixelSpan) {
        ctx.surface.invert_fill(
            OverlayRect {
                x: span.min(),
                y: ctx.host.y_offset(),
                width: span.width(),
                height: ctx.height + 1,
            },
            self.settings.color,
        );
    }
}
