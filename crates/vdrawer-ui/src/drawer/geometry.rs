use vdrawer_foundation::{Rect, Size, SurfaceBounds};

/// One of the two positions a drawer settles into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestPosition {
    Open,
    Closed,
}

impl RestPosition {
    pub fn toggled(self) -> Self {
        match self {
            RestPosition::Open => RestPosition::Closed,
            RestPosition::Closed => RestPosition::Open,
        }
    }
}

/// Extents of the content and drawer surfaces plus the peek height.
///
/// Offsets are the drawer's top edge relative to its fully open position, so
/// they are never positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawerGeometry {
    content: Size,
    drawer: Size,
    peek_height: f32,
}

impl DrawerGeometry {
    pub fn new(content: Size, drawer: Size, peek_height: f32) -> Self {
        Self {
            content,
            drawer,
            peek_height: peek_height.max(0.0),
        }
    }

    pub fn content(&self) -> Size {
        self.content
    }

    pub fn drawer(&self) -> Size {
        self.drawer
    }

    pub fn peek_height(&self) -> f32 {
        self.peek_height
    }

    pub fn drawer_height(&self) -> f32 {
        self.drawer.height.max(0.0)
    }

    pub(crate) fn set_surfaces(&mut self, content: Size, drawer: Size) {
        self.content = content;
        self.drawer = drawer;
    }

    pub(crate) fn set_peek_height(&mut self, peek_height: f32) {
        self.peek_height = peek_height.max(0.0);
    }

    /// False until layout has reported a drawer with some height.
    pub fn is_known(&self) -> bool {
        self.drawer_height() > 0.0
    }

    pub fn rest_open_top(&self) -> f32 {
        0.0
    }

    /// `-height + peek`, with the peek limited to the drawer's own height.
    pub fn rest_closed_top(&self) -> f32 {
        let height = self.drawer_height();
        -(height - self.peek_height.min(height))
    }

    pub fn rest_top(&self, position: RestPosition) -> f32 {
        match position {
            RestPosition::Open => self.rest_open_top(),
            RestPosition::Closed => self.rest_closed_top(),
        }
    }

    /// The single choke point for every offset write.
    pub fn clamp_top(&self, top: f32) -> f32 {
        top.min(self.rest_open_top()).max(self.rest_closed_top())
    }

    /// Visible drawer height for an offset.
    pub fn show_height(&self, top: f32) -> i32 {
        (self.drawer_height() + top).round() as i32
    }

    /// Share of the drawer height currently showing; `None` before layout.
    pub fn moved_fraction(&self, top: f32) -> Option<f32> {
        let height = self.drawer_height();
        if height <= 0.0 {
            return None;
        }
        Some((height + top) / height)
    }

    /// Where a released drawer goes: open only when it is not being flung
    /// upward and more than half of it shows.
    pub fn release_target(&self, top: f32, velocity_y: f32) -> RestPosition {
        match self.moved_fraction(top) {
            Some(fraction) if velocity_y >= 0.0 && fraction > 0.5 => RestPosition::Open,
            _ => RestPosition::Closed,
        }
    }

    /// Bounds handed to the pointer tracker. The drawer shares the content's
    /// left edge; horizontal position never changes.
    pub fn surface_bounds(&self, top: f32) -> SurfaceBounds {
        SurfaceBounds::new(
            Rect::from_size(self.content),
            Rect::new(0.0, top, self.drawer.width, self.drawer_height()),
        )
    }
}

#[cfg(test)]
#[path = "../tests/geometry_tests.rs"]
mod tests;
