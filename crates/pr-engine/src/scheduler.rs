//! DrawScheduler: releases timeline steps as the clock reaches them

use std::time::Duration;

use pr_stage::{Clock, DrawTimeline, PhaseStep};

use crate::session::DrawSession;

/// Walks one draw timeline in order
///
/// Steps are released no earlier than their due time and never out of order.
/// Releasing the reveal step ends the draw on the session.
#[derive(Debug, Clone)]
pub struct DrawScheduler {
    timeline: DrawTimeline,
    next: usize,
}

impl DrawScheduler {
    pub fn new(timeline: DrawTimeline) -> Self {
        Self { timeline, next: 0 }
    }

    pub fn timeline(&self) -> &DrawTimeline {
        &self.timeline
    }

    /// Release every step due at `now_ms`. The reveal step ends this
    /// timeline's draw and no other.
    pub fn advance(&mut self, now_ms: u64, session: &mut DrawSession) -> Vec<PhaseStep> {
        let mut released = Vec::new();

        while let Some(step) = self.timeline.steps.get(self.next) {
            if self.timeline.due_at(step) > now_ms {
                break;
            }
            if step.phase.is_reveal() {
                session.finish_draw(&self.timeline.draw_id);
            }
            log::trace!(
                "{}: {} released at {} ms",
                self.timeline.draw_id,
                step.phase.type_name(),
                now_ms
            );
            released.push(step.clone());
            self.next += 1;
        }

        released
    }

    /// All steps released
    pub fn is_finished(&self) -> bool {
        self.next >= self.timeline.steps.len()
    }

    /// Due time of the next pending step
    pub fn next_due_at(&self) -> Option<u64> {
        self.timeline
            .steps
            .get(self.next)
            .map(|step| self.timeline.due_at(step))
    }

    /// Sleep through the timeline, handing each step to `on_phase` as it
    /// comes due
    pub fn run_blocking<F>(&mut self, clock: &dyn Clock, session: &mut DrawSession, mut on_phase: F)
    where
        F: FnMut(&PhaseStep),
    {
        while let Some(due) = self.next_due_at() {
            let now = clock.now_ms();
            if due > now {
                std::thread::sleep(Duration::from_millis(due - now));
            }
            for step in self.advance(clock.now_ms().max(due), session) {
                on_phase(&step);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr_stage::{ManualClock, TimingConfig};

    use crate::error::DrawError;

    fn started_session(clock: &ManualClock) -> (DrawSession, DrawScheduler) {
        let mut session = DrawSession::new();
        session.seed(3);
        session
            .start_session(
                "amy",
                20,
                pr_table::compile("A:50\nB:50").unwrap().into_table(),
            )
            .unwrap();
        let outcome = session.draw(clock).unwrap();
        (session, DrawScheduler::new(outcome.timeline))
    }

    #[test]
    fn test_steps_wait_for_their_time() {
        let clock = ManualClock::new(1_000);
        let (mut session, mut scheduler) = started_session(&clock);

        let first = scheduler.advance(1_000, &mut session);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].phase.type_name(), "jump");
        assert_eq!(scheduler.next_due_at(), Some(1_050));

        assert!(scheduler.advance(1_049, &mut session).is_empty());
        let second = scheduler.advance(1_050, &mut session);
        assert_eq!(second[0].phase.type_name(), "scroll");

        assert!(session.is_busy());
        assert!(scheduler.advance(4_549, &mut session).is_empty());
        assert!(session.is_busy());

        let last = scheduler.advance(4_550, &mut session);
        assert!(last[0].phase.is_reveal());
        assert!(!session.is_busy());
        assert!(scheduler.is_finished());
        assert_eq!(scheduler.next_due_at(), None);
    }

    #[test]
    fn test_late_advance_releases_in_order() {
        let clock = ManualClock::new(0);
        let (mut session, mut scheduler) = started_session(&clock);

        let names: Vec<_> = scheduler
            .advance(10_000, &mut session)
            .iter()
            .map(|s| s.phase.type_name())
            .collect();
        assert_eq!(names, vec!["jump", "scroll", "reveal"]);
        assert!(session.can_draw());
    }

    #[test]
    fn test_run_blocking_with_instant_timing() {
        let clock = ManualClock::new(0);
        let mut session = DrawSession::new();
        session.set_timing_config(TimingConfig::instant());
        session
            .start_session("amy", 10, pr_table::compile("A:100").unwrap().into_table())
            .unwrap();

        let outcome = session.draw(&clock).unwrap();
        let mut scheduler = DrawScheduler::new(outcome.timeline);
        let mut seen = Vec::new();
        scheduler.run_blocking(&clock, &mut session, |step| seen.push(step.phase.type_name()));

        assert_eq!(seen, vec!["jump", "scroll", "reveal"]);
        assert!(!session.is_busy());
        assert!(!session.can_draw());
    }

    #[test]
    fn test_stale_scheduler_cannot_release_newer_draw() {
        let clock = ManualClock::new(0);
        let (mut session, mut stale) = started_session(&clock);

        let table = session.table().clone();
        session.start_session("bob", 20, table).unwrap();
        let bob = session.draw(&clock).unwrap();

        let released = stale.advance(3_550, &mut session);
        assert!(released.last().unwrap().phase.is_reveal());
        assert!(session.is_busy());
        assert_eq!(session.draw(&clock), Err(DrawError::DrawInProgress));
        assert_eq!(session.points(), 10);

        let mut current = DrawScheduler::new(bob.timeline);
        current.advance(3_550, &mut session);
        assert!(!session.is_busy());
    }
}
