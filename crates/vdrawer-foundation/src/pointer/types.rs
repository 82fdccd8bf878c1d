use crate::geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw input sample, in container coordinates.
///
/// `uptime_ms` is a monotonic timestamp; only differences between samples of
/// the same pointer are meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_ms: i64,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point, uptime_ms: i64) -> Self {
        Self {
            id,
            kind,
            position,
            uptime_ms,
        }
    }

    pub fn down(id: PointerId, x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Down, Point::new(x, y), uptime_ms)
    }

    pub fn moved(id: PointerId, x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Move, Point::new(x, y), uptime_ms)
    }

    pub fn up(id: PointerId, x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Up, Point::new(x, y), uptime_ms)
    }

    pub fn cancel(id: PointerId, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Cancel, Point::ZERO, uptime_ms)
    }
}
