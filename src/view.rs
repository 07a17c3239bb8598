use bevy::{math::vec2, prelude::*};

use crate::prelude::*;

/// Which way one discrete zoom input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Only the sign of a scroll delta matters. A zero delta is no zoom event.
    pub fn from_scroll(y: f32) -> Option<Self> {
        if y > 0.0 {
            Some(ZoomDirection::In)
        } else if y < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// The visible part of the board.
///
/// Positions on the board ("world") and on the viewport ("pointer") are both normalized
/// to [0, 1] with the origin at the bottom left.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// 1.0 shows the whole board
    pub zoom: f32,
    /// world position shown at the middle of the viewport
    pub center: Vec2,
}

impl Default for View {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            center: Vec2::splat(0.5),
        }
    }
}

impl View {
    /// world position under a viewport position
    #[inline]
    pub fn world_at(&self, pointer: Vec2) -> Vec2 {
        (pointer - 0.5) / self.zoom + self.center
    }

    /// Maps a viewport position to the (row, col) of a `width` x `height` board, row 0
    /// at the top. The result is not bounds-checked.
    pub fn pointer_to_cell(&self, pointer: Vec2, width: usize, height: usize) -> (i32, i32) {
        let world = self.world_at(pointer);
        let col = (world.x * width as f32).floor() as i32;
        let row_from_bottom = (world.y * height as f32).floor() as i32;
        (height as i32 - 1 - row_from_bottom, col)
    }

    /// Applies one zoom step while keeping the world position under `pointer` in place.
    pub fn zoom_at(&mut self, pointer: Vec2, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => ZOOM_STEP.recip(),
        };
        self.zoom_to(pointer, self.zoom * factor);
    }

    /// Sets the zoom (clamped to [`MIN_ZOOM`], [`MAX_ZOOM`]) about `pointer`.
    pub fn zoom_to(&mut self, pointer: Vec2, zoom: f32) {
        let new_zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.center += (pointer - 0.5) * (self.zoom.recip() - new_zoom.recip());
        self.zoom = new_zoom;
        self.clamp_center();
    }

    /// Moves the view by a viewport-space delta, so the world follows the pointer.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
        self.clamp_center();
    }

    /// Keeps the visible window inside the board.
    pub fn clamp_center(&mut self) {
        let half = 0.5 / self.zoom;
        self.center = self.center.clamp(Vec2::splat(half), Vec2::splat(1.0 - half));
    }

    /// the visible window in world space
    pub fn visible_rect(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(self.zoom.recip()))
    }
}

/// Converts a window cursor position (logical pixels, origin top left) to viewport space.
#[inline]
pub fn cursor_to_pointer(cursor: Vec2, window_size: Vec2) -> Vec2 {
    vec2(cursor.x / window_size.x, 1.0 - cursor.y / window_size.y)
}
