use egui::{CursorIcon, Pos2, Response};

use crate::{DragMarker, PaintContext, PointerPos, SelectionHost, SpanTracker};

impl From<Pos2> for PointerPos {
    fn from(pos: Pos2) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
        }
    }
}

impl DragMarker {
    /// Cursor a host shows while the pointer can grab this marker.
    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            DragMarker::None => CursorIcon::Default,
            DragMarker::Start | DragMarker::End => CursorIcon::ResizeHorizontal,
        }
    }
}

impl SpanTracker {
    /// Drives the gesture from an egui drag response. `cursor` is the
    /// pointer position already translated into surface coordinates.
    /// Marker resizing is the host's business and stays outside of this.
    pub fn handle_drag_response<H: SelectionHost>(
        &mut self,
        response: &Response,
        cursor: Option<PointerPos>,
        ctx: &mut PaintContext<'_, H>,
    ) {
        if response.drag_started() || response.dragged() {
            if let Some(p) = cursor {
                self.update_selection(p, ctx);
            }
        }
        if response.drag_stopped() {
            self.stop_selecting(cursor, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_pos_truncates_subpixels() {
        assert_eq!(
            PointerPos::from(Pos2::new(10.7, 3.2)),
            PointerPos::new(10, 3)
        );
    }

    #[test]
    fn markers_use_the_horizontal_resize_cursor() {
        assert_eq!(
            DragMarker::Start.cursor_icon(),
            CursorIcon::ResizeHorizontal
        );
        assert_eq!(DragMarker::End.cursor_icon(), CursorIcon::ResizeHorizontal);
        assert_eq!(DragMarker::None.cursor_icon(), CursorIcon::Default);
    }
}
