// src/editor/drag.rs
//! Drag/drop coordination: turns a press-drag-release gesture into a move.

use crate::types::BlockId;

/// Where the gesture currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: BlockId,
    },
    HoveringTarget {
        source: BlockId,
        target: BlockId,
    },
}

/// A completed drop: move `source` to where `target` sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub source: BlockId,
    pub target: BlockId,
}

/// Tracks the dragged block and the hovered drop zone.
///
/// Never yields a `MoveRequest` whose source equals its target.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Begins dragging `source`, abandoning any gesture in progress.
    pub fn start(&mut self, source: BlockId) {
        log::trace!("Drag start: {}", source);
        self.state = DragState::Dragging { source };
    }

    /// Pointer is over `target`. Hovering the source itself is ignored.
    pub fn over(&mut self, target: BlockId) {
        let source = match &self.state {
            DragState::Idle => return,
            DragState::Dragging { source } | DragState::HoveringTarget { source, .. } => {
                source.clone()
            }
        };
        if source == target {
            return;
        }
        self.state = DragState::HoveringTarget { source, target };
    }

    /// Pointer left `target`; drops the highlight if it was the hovered block.
    pub fn leave(&mut self, target: &BlockId) {
        if let DragState::HoveringTarget { source, target: hovered } = &self.state {
            if hovered == target {
                self.state = DragState::Dragging {
                    source: source.clone(),
                };
            }
        }
    }

    /// Released over `on`. Returns the move to perform, if any, and resets.
    pub fn drop(&mut self, on: &BlockId) -> Option<MoveRequest> {
        let state = std::mem::take(&mut self.state);
        match state {
            DragState::Dragging { source } | DragState::HoveringTarget { source, .. }
                if &source != on =>
            {
                log::debug!("Drop: {} onto {}", source, on);
                Some(MoveRequest {
                    source,
                    target: on.clone(),
                })
            }
            _ => None,
        }
    }

    /// Gesture ended without a drop (escape, released outside).
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Whether `id` is the block being dragged (rendered de-emphasized).
    pub fn is_source(&self, id: &BlockId) -> bool {
        match &self.state {
            DragState::Dragging { source } | DragState::HoveringTarget { source, .. } => {
                source == id
            }
            DragState::Idle => false,
        }
    }

    /// Whether `id` is the highlighted drop zone.
    pub fn is_target(&self, id: &BlockId) -> bool {
        matches!(&self.state, DragState::HoveringTarget { target, .. } if target == id)
    }
}
