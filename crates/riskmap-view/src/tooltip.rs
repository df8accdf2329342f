//! Hover tooltip scheduling with cancellable, asymmetric delays.
//!
//! Timer chains are modelled as explicit deadlines pumped by [`tick`]
//! rather than background threads: at most one show and one hide deadline
//! exist at a time, arming either kind replaces its predecessor, and
//! dropping the scheduler cancels everything. This keeps a stale hide
//! from firing after a fresh enter (and vice versa) and makes teardown
//! deterministic.
//!
//! [`tick`]: TooltipScheduler::tick

use riskmap_core::{EngineConfig, NodeId, Rect, Vec2};
use riskmap_events::{Event, EventBus, TooltipInfo};
use std::time::{Duration, Instant};

/// Margin kept between the panel and the viewport edges.
const EDGE_MARGIN: f32 = 8.0;
/// Offset from the pointer to the panel's top-left corner.
const POINTER_OFFSET: f32 = 12.0;
/// Panel size assumed until the host measures the real one.
const DEFAULT_PANEL_SIZE: Vec2 = Vec2 { x: 240.0, y: 120.0 };

/// Lifecycle of the hover panel for the current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPhase {
    Hidden,
    PendingShow,
    Shown,
    PendingHide,
}

pub struct TooltipScheduler {
    phase: TooltipPhase,
    target: Option<NodeId>,
    /// Detail data plus the most recent pointer position. Recorded on
    /// enter so a follow-mouse panel appears already tracking the pointer.
    detail: Option<(TooltipInfo, Vec2)>,
    show_deadline: Option<Instant>,
    hide_deadline: Option<Instant>,
    show_delay: Duration,
    hide_delay: Duration,
    follow_mouse: bool,
    panel_size: Vec2,
    viewport: Rect,
    bus: EventBus,
}

impl TooltipScheduler {
    pub fn new(config: &EngineConfig, viewport: Rect, bus: EventBus) -> Self {
        Self {
            phase: TooltipPhase::Hidden,
            target: None,
            detail: None,
            show_deadline: None,
            hide_deadline: None,
            show_delay: Duration::from_millis(config.show_delay_ms),
            hide_delay: Duration::from_millis(config.hide_delay_ms),
            follow_mouse: config.follow_mouse,
            panel_size: DEFAULT_PANEL_SIZE,
            viewport,
            bus,
        }
    }

    pub fn phase(&self) -> TooltipPhase {
        self.phase
    }

    pub fn target(&self) -> Option<&NodeId> {
        self.target.as_ref()
    }

    /// Update the viewport rectangle used for position clamping.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Update the panel size used for position clamping.
    pub fn set_panel_size(&mut self, size: Vec2) {
        self.panel_size = size;
    }

    /// Pointer entered a node. Any pending hide is cancelled; a new show
    /// deadline replaces any previous one.
    pub fn pointer_enter(&mut self, id: NodeId, info: TooltipInfo, pos: Vec2, now: Instant) {
        self.hide_deadline = None;

        if self.target.as_ref() == Some(&id)
            && matches!(self.phase, TooltipPhase::Shown | TooltipPhase::PendingHide)
        {
            // re-entering the current target keeps the panel up
            self.phase = TooltipPhase::Shown;
            self.detail = Some((info, pos));
            return;
        }

        if self.phase == TooltipPhase::Shown {
            // moving directly to a different node: the old panel goes away
            // immediately, the new one waits its own show delay
            self.bus.publish(Event::TooltipHide);
        }
        self.target = Some(id);
        self.detail = Some((info, pos));
        self.show_deadline = Some(now + self.show_delay);
        self.phase = TooltipPhase::PendingShow;
    }

    /// Pointer left the current node. A pending show is cancelled; a shown
    /// panel gets a hide deadline.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.show_deadline = None;
        match self.phase {
            TooltipPhase::PendingShow => {
                self.phase = TooltipPhase::Hidden;
                self.target = None;
                self.detail = None;
            }
            TooltipPhase::Shown => {
                self.hide_deadline = Some(now + self.hide_delay);
                self.phase = TooltipPhase::PendingHide;
            }
            TooltipPhase::Hidden | TooltipPhase::PendingHide => {}
        }
    }

    /// Pointer moved while over the current target.
    pub fn pointer_move(&mut self, pos: Vec2, _now: Instant) {
        if let Some(detail) = &mut self.detail {
            detail.1 = pos;
        }
        if self.phase == TooltipPhase::Shown && self.follow_mouse {
            if let Some((info, _)) = &self.detail {
                let clamped = self.clamp_position(pos);
                self.bus.publish(Event::TooltipShow {
                    info: info.clone(),
                    x: clamped.x,
                    y: clamped.y,
                });
            }
        }
    }

    /// Fire any due deadline. Call once per frame from the host loop.
    pub fn tick(&mut self, now: Instant) {
        if self.phase == TooltipPhase::PendingShow
            && self.show_deadline.is_some_and(|deadline| now >= deadline)
        {
            self.show_deadline = None;
            if let Some((info, pos)) = &self.detail {
                let clamped = self.clamp_position(*pos);
                self.bus.publish(Event::TooltipShow {
                    info: info.clone(),
                    x: clamped.x,
                    y: clamped.y,
                });
                self.phase = TooltipPhase::Shown;
            } else {
                self.phase = TooltipPhase::Hidden;
            }
        }

        if self.phase == TooltipPhase::PendingHide
            && self.hide_deadline.is_some_and(|deadline| now >= deadline)
        {
            self.hide_deadline = None;
            self.phase = TooltipPhase::Hidden;
            self.target = None;
            self.detail = None;
            self.bus.publish(Event::TooltipHide);
        }
    }

    /// Cancel all deadlines and clear the panel state. Used on teardown so
    /// no timer can act on a dead target.
    pub fn cancel_all(&mut self) {
        self.show_deadline = None;
        self.hide_deadline = None;
        self.target = None;
        self.detail = None;
        if self.phase == TooltipPhase::Shown || self.phase == TooltipPhase::PendingHide {
            self.bus.publish(Event::TooltipHide);
        }
        self.phase = TooltipPhase::Hidden;
    }

    /// Clamp the panel position so it never extends past the viewport
    /// edges, keeping a fixed margin.
    fn clamp_position(&self, pointer: Vec2) -> Vec2 {
        let mut pos = pointer + Vec2::new(POINTER_OFFSET, POINTER_OFFSET);
        let max_x = self.viewport.max.x - self.panel_size.x - EDGE_MARGIN;
        let max_y = self.viewport.max.y - self.panel_size.y - EDGE_MARGIN;
        pos.x = pos.x.min(max_x).max(self.viewport.min.x + EDGE_MARGIN);
        pos.y = pos.y.min(max_y).max(self.viewport.min.y + EDGE_MARGIN);
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Receiver;

    fn scheduler(config: EngineConfig) -> (TooltipScheduler, Receiver<Event>) {
        let bus = EventBus::new();
        let rx = bus.receiver();
        let viewport = Rect::from_min_size(Vec2::ZERO, Vec2::new(800.0, 600.0));
        (TooltipScheduler::new(&config, viewport, bus), rx)
    }

    fn info(title: &str) -> TooltipInfo {
        TooltipInfo {
            title: title.to_string(),
            description: "detail".to_string(),
        }
    }

    fn drain(rx: &Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_show_fires_after_delay() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();

        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::new(100.0, 100.0), start);
        assert_eq!(tooltip.phase(), TooltipPhase::PendingShow);

        tooltip.tick(start + Duration::from_millis(100));
        assert_eq!(tooltip.phase(), TooltipPhase::PendingShow);
        assert!(drain(&rx).is_empty());

        tooltip.tick(start + Duration::from_millis(300));
        assert_eq!(tooltip.phase(), TooltipPhase::Shown);
        match drain(&rx).as_slice() {
            [Event::TooltipShow { info, x, y }] => {
                assert_eq!(info.title, "Ops");
                assert_eq!(*x, 112.0);
                assert_eq!(*y, 112.0);
            }
            other => panic!("expected a single TooltipShow, got {other:?}"),
        }
    }

    #[test]
    fn test_leave_before_deadline_cancels_show() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();

        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::ZERO, start);
        tooltip.pointer_leave(start + Duration::from_millis(50));
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);

        // even well past the original deadline, nothing fires
        tooltip.tick(start + Duration::from_secs(5));
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_reenter_cancels_pending_hide() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();
        let id = NodeId::from("a");

        tooltip.pointer_enter(id.clone(), info("Ops"), Vec2::ZERO, start);
        tooltip.tick(start + Duration::from_millis(300));
        assert_eq!(tooltip.phase(), TooltipPhase::Shown);
        drain(&rx);

        tooltip.pointer_leave(start + Duration::from_millis(400));
        assert_eq!(tooltip.phase(), TooltipPhase::PendingHide);

        // fresh enter before the hide deadline keeps the panel up
        tooltip.pointer_enter(id, info("Ops"), Vec2::ZERO, start + Duration::from_millis(450));
        assert_eq!(tooltip.phase(), TooltipPhase::Shown);

        // the stale hide deadline must not fire later
        tooltip.tick(start + Duration::from_secs(5));
        assert_eq!(tooltip.phase(), TooltipPhase::Shown);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_hide_fires_after_delay_and_clears_detail() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();

        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::ZERO, start);
        tooltip.tick(start + Duration::from_millis(300));
        tooltip.pointer_leave(start + Duration::from_millis(400));
        drain(&rx);

        tooltip.tick(start + Duration::from_millis(549));
        assert_eq!(tooltip.phase(), TooltipPhase::PendingHide);

        tooltip.tick(start + Duration::from_millis(550));
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
        assert!(tooltip.target().is_none());
        assert!(matches!(drain(&rx).as_slice(), [Event::TooltipHide]));
    }

    #[test]
    fn test_switching_target_hides_old_panel_immediately() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();

        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::ZERO, start);
        tooltip.tick(start + Duration::from_millis(300));
        drain(&rx);

        tooltip.pointer_enter(
            NodeId::from("b"),
            info("Fin"),
            Vec2::ZERO,
            start + Duration::from_millis(400),
        );
        assert_eq!(tooltip.phase(), TooltipPhase::PendingShow);
        assert_eq!(tooltip.target().map(NodeId::as_str), Some("b"));
        assert!(matches!(drain(&rx).as_slice(), [Event::TooltipHide]));
    }

    #[test]
    fn test_follow_mouse_tracks_without_delay() {
        let config = EngineConfig {
            follow_mouse: true,
            ..EngineConfig::default()
        };
        let (mut tooltip, rx) = scheduler(config);
        let start = Instant::now();

        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::new(10.0, 10.0), start);
        // moves while pending update the recorded position, not the screen
        tooltip.pointer_move(Vec2::new(40.0, 40.0), start + Duration::from_millis(100));
        assert!(drain(&rx).is_empty());

        tooltip.tick(start + Duration::from_millis(300));
        let shown = drain(&rx);
        match shown.as_slice() {
            [Event::TooltipShow { x, y, .. }] => {
                assert_eq!(*x, 52.0);
                assert_eq!(*y, 52.0);
            }
            other => panic!("expected TooltipShow, got {other:?}"),
        }

        tooltip.pointer_move(Vec2::new(60.0, 20.0), start + Duration::from_millis(350));
        match drain(&rx).as_slice() {
            [Event::TooltipShow { x, y, .. }] => {
                assert_eq!(*x, 72.0);
                assert_eq!(*y, 32.0);
            }
            other => panic!("expected TooltipShow, got {other:?}"),
        }
    }

    #[test]
    fn test_position_clamps_to_viewport_edges() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();

        // pointer near the bottom-right corner of the 800x600 viewport
        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::new(790.0, 590.0), start);
        tooltip.tick(start + Duration::from_millis(300));

        match drain(&rx).as_slice() {
            [Event::TooltipShow { x, y, .. }] => {
                // 800 - 240 panel - 8 margin, 600 - 120 panel - 8 margin
                assert_eq!(*x, 552.0);
                assert_eq!(*y, 472.0);
            }
            other => panic!("expected TooltipShow, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_all_clears_everything() {
        let (mut tooltip, rx) = scheduler(EngineConfig::default());
        let start = Instant::now();

        tooltip.pointer_enter(NodeId::from("a"), info("Ops"), Vec2::ZERO, start);
        tooltip.tick(start + Duration::from_millis(300));
        drain(&rx);

        tooltip.cancel_all();
        assert_eq!(tooltip.phase(), TooltipPhase::Hidden);
        assert!(tooltip.target().is_none());
        assert!(matches!(drain(&rx).as_slice(), [Event::TooltipHide]));

        tooltip.tick(start + Duration::from_secs(10));
        assert!(drain(&rx).is_empty());
    }
}
