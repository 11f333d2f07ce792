//! Explicit session state for the editor integration layer
//!
//! The host integration needs a few pieces of cross-cutting state: whether
//! the panel is open, whether an open operation is mid-flight (opening a
//! split fires window events that would otherwise re-enter), and which
//! editor buffer hosts the panel. This is a plain context object handed to
//! the integration layer, created at activation and torn down at shutdown.

/// Identifier of the editor buffer hosting the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

/// Panel session state
#[derive(Debug, Default)]
pub struct ViewSession {
    open: bool,
    opening: bool,
    buffer: Option<BufferId>,
}

impl ViewSession {
    pub fn init() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_opening(&self) -> bool {
        self.opening
    }

    pub fn buffer(&self) -> Option<BufferId> {
        self.buffer
    }

    /// Begin an open operation. Returns false if one is already in
    /// flight, in which case the caller must bail out.
    pub fn begin_opening(&mut self) -> bool {
        if self.opening {
            return false;
        }
        self.opening = true;
        true
    }

    pub fn finish_opening(&mut self) {
        self.opening = false;
    }

    /// Record that the panel is open in the given buffer.
    pub fn mark_open(&mut self, buffer: BufferId) {
        self.open = true;
        self.buffer = Some(buffer);
    }

    pub fn mark_closed(&mut self) {
        self.open = false;
    }

    /// Reset everything at shutdown.
    pub fn teardown(&mut self) {
        *self = Self::default();
    }
}
