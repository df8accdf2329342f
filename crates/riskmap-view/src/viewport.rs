//! Pan/zoom state machine for the tree viewport.
//!
//! Two states: idle and dragging. All transitions are synchronous; inputs
//! that arrive while the relevant interaction is disabled, or out of
//! state (a move with no active drag), are silent no-ops.

use riskmap_core::{EngineConfig, Key, PointerEvent, Vec2};
use riskmap_events::{Event, EventBus};

/// Zoom step applied by the `+`/`-` keys.
const KEY_ZOOM_STEP: f32 = 0.2;
/// Pan step in pixels applied by the arrow keys.
const KEY_PAN_STEP: f32 = 40.0;
/// Default zoom restored by the reset key.
const DEFAULT_ZOOM: f32 = 1.0;

#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Pointer position at the last applied move; re-captured every move
    /// so sensitivity scaling never accumulates drift.
    last_pos: Vec2,
}

pub struct ViewportController {
    zoom: f32,
    pan: Vec2,
    drag: Option<DragState>,
    config: EngineConfig,
    bus: EventBus,
}

impl ViewportController {
    pub fn new(config: EngineConfig, bus: EventBus) -> Self {
        let extent = config.zoom_extent;
        Self {
            zoom: DEFAULT_ZOOM.clamp(extent.min, extent.max),
            pan: Vec2::ZERO,
            drag: None,
            config,
            bus,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a drag-pan, capturing the pointer position.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if !self.config.enable_drag_pan {
            return;
        }
        self.drag = Some(DragState {
            last_pos: event.position,
        });
    }

    /// Apply a pointer move. Without an active drag this is a no-op:
    /// ordinary event ordering can deliver moves with no preceding down.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let delta = (event.position - drag.last_pos) * self.config.pan_sensitivity;
        drag.last_pos = event.position;
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.notify();
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn pointer_leave(&mut self) {
        self.drag = None;
    }

    /// Wheel zoom: one sensitivity step per notch, clamped to the extent.
    /// Independent of drag state.
    pub fn wheel(&mut self, delta: f32) {
        if !self.config.enable_wheel_zoom || delta == 0.0 {
            return;
        }
        self.zoom_by(delta.signum() * self.config.zoom_sensitivity);
    }

    pub fn key(&mut self, key: Key) {
        if !self.config.enable_keyboard_navigation {
            return;
        }
        match key {
            Key::ZoomIn => self.zoom_by(KEY_ZOOM_STEP),
            Key::ZoomOut => self.zoom_by(-KEY_ZOOM_STEP),
            Key::PanLeft => self.pan_by(Vec2::new(-KEY_PAN_STEP, 0.0)),
            Key::PanRight => self.pan_by(Vec2::new(KEY_PAN_STEP, 0.0)),
            Key::PanUp => self.pan_by(Vec2::new(0.0, -KEY_PAN_STEP)),
            Key::PanDown => self.pan_by(Vec2::new(0.0, KEY_PAN_STEP)),
            Key::Reset => self.reset(),
        }
    }

    /// Restore the configured default zoom and pan.
    pub fn reset(&mut self) {
        tracing::debug!("viewport reset");
        let extent = self.config.zoom_extent;
        self.zoom = DEFAULT_ZOOM.clamp(extent.min, extent.max);
        self.pan = Vec2::ZERO;
        self.notify();
    }

    fn zoom_by(&mut self, delta: f32) {
        let extent = self.config.zoom_extent;
        let new_zoom = (self.zoom + delta).clamp(extent.min, extent.max);
        if (new_zoom - self.zoom).abs() <= f32::EPSILON {
            return;
        }
        self.zoom = new_zoom;
        self.notify();
    }

    fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
        self.notify();
    }

    fn notify(&self) {
        self.bus.publish(Event::ViewportChanged {
            zoom: self.zoom,
            pan: self.pan,
        });
    }
}
