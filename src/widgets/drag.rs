//! Drag-to-reorder controller
//!
//! Turns pointer and keyboard input into reorder instructions. The controller
//! only tracks the gesture; applying the instruction is up to the owner of the
//! widget list.

/// Pointer position in the owner's coordinate space (terminal cells for the TUI).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: PointerPos) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Move the widget currently at `from` so that it ends up at `to`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReorderInstruction {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    /// Pointer pressed on a card but not yet moved past the activation distance.
    Pending { source: usize, origin: PointerPos },
    /// Pointer drag in progress.
    Dragging { source: usize, over: Option<usize> },
    /// Keyboard drag in progress.
    Keyboard { source: usize, target: usize },
}

#[derive(Debug, Clone)]
pub struct DragController {
    activation_distance: f64,
    state: DragState,
}

impl DragController {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance: activation_distance.max(0.0),
            state: DragState::Idle,
        }
    }

    /// Index of the card being dragged, once the drag is active.
    pub fn active_source(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { source, .. } | DragState::Keyboard { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    /// Current prospective drop position.
    pub fn drop_target(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { over, .. } => over,
            DragState::Keyboard { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active_source().is_some()
    }

    pub fn pointer_down(&mut self, source: usize, pos: PointerPos) {
        self.state = DragState::Pending {
            source,
            origin: pos,
        };
    }

    /// Track pointer motion. Returns true when this move activated the drag.
    pub fn pointer_move(&mut self, pos: PointerPos) -> bool {
        if let DragState::Pending { source, origin } = self.state {
            if origin.distance(pos) >= self.activation_distance {
                self.state = DragState::Dragging {
                    source,
                    over: Some(source),
                };
                return true;
            }
        }
        false
    }

    /// Record the card under the pointer; `None` means no valid drop target.
    pub fn drag_over(&mut self, target: Option<usize>) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = target;
        }
    }

    /// Release the pointer. A press that never activated is a click.
    pub fn pointer_up(&mut self) -> Option<ReorderInstruction> {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Dragging {
                source,
                over: Some(target),
            } => instruction(source, target),
            _ => None,
        }
    }

    /// Start a keyboard drag on the focused card.
    pub fn pick_up(&mut self, source: usize) {
        self.state = DragState::Keyboard {
            source,
            target: source,
        };
    }

    pub fn move_up(&mut self) {
        if let DragState::Keyboard { target, .. } = &mut self.state {
            *target = target.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if let DragState::Keyboard { target, .. } = &mut self.state {
            *target = (*target + 1).min(len.saturating_sub(1));
        }
    }

    /// Finish a keyboard drag.
    pub fn release(&mut self) -> Option<ReorderInstruction> {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Keyboard { source, target } => instruction(source, target),
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

fn instruction(from: usize, to: usize) -> Option<ReorderInstruction> {
    (from != to).then_some(ReorderInstruction { from, to })
}
