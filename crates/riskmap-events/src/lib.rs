use crossbeam_channel::{unbounded, Receiver, Sender};
use riskmap_core::{NodeId, PointerEvent, RenderNode, Vec2};
use serde::{Deserialize, Serialize};

/// Detail payload for the hover tooltip panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipInfo {
    pub title: String,
    pub description: String,
}

/// Everything the engine reports to its host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// A node was clicked; carries the full render node and the raw input.
    NodeActivated {
        node: RenderNode,
        pointer: PointerEvent,
    },
    NodeHoverEnter {
        id: NodeId,
    },
    NodeHoverExit {
        id: NodeId,
    },
    /// Candidate expansion set after a toggle. The host owns the canonical
    /// set and must adopt this before the next build; the engine never
    /// mutates its own tree in response.
    ExpansionChanged {
        expanded: Vec<NodeId>,
    },
    ViewportChanged {
        zoom: f32,
        pan: Vec2,
    },
    TooltipShow {
        info: TooltipInfo,
        x: f32,
        y: f32,
    },
    TooltipHide,
    /// Validation diagnostics surfaced after a rebuild.
    ValidationIssues {
        errors: Vec<String>,
        warnings: Vec<String>,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the host's render loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}
