use crate::foundation::error::ProgResult;
use crate::render::backend::{DrawState, Primitive, Renderer};

/// One call received by a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// `push_state`.
    Push(DrawState),
    /// `pop_state`.
    Pop,
    /// `draw`, with the state that was innermost at the time.
    Draw {
        /// Primitive passed to `draw`.
        primitive: Primitive,
        /// Innermost state, if any was pushed.
        state: Option<DrawState>,
    },
}

/// Renderer that keeps every call for inspection instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Vec<RecordedEvent>,
    stack: Vec<DrawState>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in the order they arrived.
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Only the drawn primitives with their states.
    pub fn draws(&self) -> impl Iterator<Item = (&Primitive, Option<&DrawState>)> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::Draw { primitive, state } => Some((primitive, state.as_ref())),
            _ => None,
        })
    }

    /// Current nesting depth; zero after a balanced traversal.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Renderer for RecordingRenderer {
    fn push_state(&mut self, state: &DrawState) {
        self.stack.push(state.clone());
        self.events.push(RecordedEvent::Push(state.clone()));
    }

    fn pop_state(&mut self) {
        self.stack.pop();
        self.events.push(RecordedEvent::Pop);
    }

    fn draw(&mut self, primitive: &Primitive) -> ProgResult<()> {
        self.events.push(RecordedEvent::Draw {
            primitive: primitive.clone(),
            state: self.stack.last().cloned(),
        });
        Ok(())
    }
}
