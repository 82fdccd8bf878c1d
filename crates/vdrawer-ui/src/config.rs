use vdrawer_animation::SettleSpec;
use vdrawer_foundation::gesture_constants::{
    DEFAULT_SENSITIVITY, DRAG_THRESHOLD, EDGE_SIZE, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY,
};
use vdrawer_foundation::TrackerConfig;

/// Visible drawer height when closed, in logical pixels.
pub const DEFAULT_PEEK_HEIGHT: f32 = 360.0;

/// Drawer options.
///
/// ```
/// use vdrawer_ui::DrawerConfig;
///
/// let config = DrawerConfig::default()
///     .with_peek_height(200.0)
///     .with_can_scroll(false);
/// assert_eq!(config.peek_height, 200.0);
/// assert!(!config.can_scroll);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerConfig {
    /// Allows capture by touching the drawer body. Edge drags work regardless.
    pub can_scroll: bool,
    pub peek_height: f32,
    /// Divides `touch_slop`; higher values capture sooner.
    pub sensitivity: f32,
    pub touch_slop: f32,
    pub edge_size: f32,
    pub edge_tracking: bool,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub settle: SettleSpec,
}

impl DrawerConfig {
    pub fn with_can_scroll(mut self, can_scroll: bool) -> Self {
        self.can_scroll = can_scroll;
        self
    }

    pub fn with_peek_height(mut self, peek_height: f32) -> Self {
        self.peek_height = peek_height.max(0.0);
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_edge_size(mut self, edge_size: f32) -> Self {
        self.edge_size = edge_size;
        self
    }

    pub fn with_edge_tracking(mut self, edge_tracking: bool) -> Self {
        self.edge_tracking = edge_tracking;
        self
    }

    pub fn with_settle_spec(mut self, settle: SettleSpec) -> Self {
        self.settle = settle;
        self
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            touch_slop: self.touch_slop / self.sensitivity.max(f32::EPSILON),
            edge_size: self.edge_size,
            edge_tracking: self.edge_tracking,
            min_fling_velocity: self.min_fling_velocity,
            max_fling_velocity: self.max_fling_velocity,
        }
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            can_scroll: true,
            peek_height: DEFAULT_PEEK_HEIGHT,
            sensitivity: DEFAULT_SENSITIVITY,
            touch_slop: DRAG_THRESHOLD,
            edge_size: EDGE_SIZE,
            edge_tracking: true,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            settle: SettleSpec::default(),
        }
    }
}
