//! Thread-safe session handle

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use pr_stage::{Clock, PhaseStep};

use crate::draw::DrawOutcome;
use crate::error::EngineResult;
use crate::scheduler::DrawScheduler;
use crate::session::{DrawSession, SessionStatus};

/// Cloneable handle to one session
///
/// The lock is held for the whole precondition check and debit, so two
/// callers racing on the draw control can never both spend points.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<DrawSession>>,
}

impl SessionHandle {
    pub fn new(session: DrawSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Direct access for setup and inspection
    pub fn lock(&self) -> MutexGuard<'_, DrawSession> {
        self.inner.lock()
    }

    pub fn draw(&self, clock: &dyn Clock) -> EngineResult<DrawOutcome> {
        self.inner.lock().draw(clock)
    }

    pub fn finish_draw(&self, draw_id: &str) -> bool {
        self.inner.lock().finish_draw(draw_id)
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.lock().status()
    }

    /// Release due steps of `scheduler` against this session
    pub fn advance(&self, scheduler: &mut DrawScheduler, now_ms: u64) -> Vec<PhaseStep> {
        scheduler.advance(now_ms, &mut self.inner.lock())
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new(DrawSession::default())
    }
}
