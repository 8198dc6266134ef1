use embassy_time::Instant;

use crate::{render, LightColor, Panel, Sequence};

/// Position in the sequence and the color currently lit.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleState {
    pub index: usize,
    pub active: LightColor,
}

/// Walks a [`Sequence`] as time passes.
///
/// The driver holds at most one pending deadline. It is armed by
/// [`Cycle::start`], re-armed on every transition, and cleared by
/// [`Cycle::stop`]. The driver never reads a clock itself: callers hand in
/// `now`, which keeps it deterministic and lets [`crate::run`] own the actual
/// timer.
#[derive(Debug, Clone)]
pub struct Cycle<'s> {
    sequence: Sequence<'s>,
    state: CycleState,
    deadline: Option<Instant>,
}

impl<'s> Cycle<'s> {
    pub fn new(sequence: Sequence<'s>) -> Self {
        let active = sequence.phase(0).color;

        Self {
            sequence,
            state: CycleState { index: 0, active },
            deadline: None,
        }
    }

    /// Activates the first phase at `now`. Restarts from the top if already running.
    pub fn start(&mut self, now: Instant) {
        info!("cycle start, {} phases", self.sequence.len());
        self.activate(0, now);
    }

    /// Cancels the pending transition. Returns whether one was pending.
    ///
    /// Once stopped, [`Cycle::poll`] and [`Cycle::advance`] leave the state untouched.
    pub fn stop(&mut self) -> bool {
        let pending = self.deadline.take().is_some();
        if pending {
            info!("cycle stop at index {}", self.state.index);
        }

        pending
    }

    /// Moves to the next phase, wrapping at the end, with its timer starting at `at`.
    pub fn advance(&mut self, at: Instant) -> bool {
        if self.deadline.is_none() {
            warn!("advance on a stopped cycle ignored");
            return false;
        }
        let next = (self.state.index + 1) % self.sequence.len();
        self.activate(next, at);

        true
    }

    /// Fires every deadline that has elapsed by `now`, oldest first.
    ///
    /// Each phase is timed from the previous deadline rather than from `now`, so
    /// a late poll catches up without drifting. Returns whether the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(deadline) = self.deadline {
            if now < deadline {
                break;
            }
            changed |= self.advance(deadline);
        }

        changed
    }

    fn activate(&mut self, index: usize, at: Instant) {
        let phase = self.sequence.phase(index);
        self.state = CycleState {
            index,
            active: phase.color,
        };
        self.deadline = Some(at + phase.duration);
        debug!("phase {} = {:?} for {} ms", index, phase.color, phase.duration.as_millis());
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn active(&self) -> LightColor {
        self.state.active
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    /// When the pending transition fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn sequence(&self) -> Sequence<'s> {
        self.sequence
    }

    pub fn render(&self) -> Panel {
        render(self.state.active)
    }
}

impl Default for Cycle<'static> {
    fn default() -> Self {
        Self::new(Sequence::standard())
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Duration;

    use super::*;
    use crate::Phase;

    fn at(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn mounted() -> Cycle<'static> {
        let mut cycle = Cycle::default();
        cycle.start(at(0));
        cycle
    }

    fn assert_consistent(cycle: &Cycle<'_>) {
        let phase = cycle.sequence().get(cycle.index()).unwrap();
        assert_eq!(cycle.active(), phase.color);
    }

    #[test]
    fn mount_shows_green() {
        let cycle = mounted();
        assert_eq!(cycle.active(), LightColor::Green);
        assert_eq!(cycle.index(), 0);
        assert_eq!(cycle.deadline(), Some(at(5000)));
        assert_eq!(cycle.render().lit(), Some(LightColor::Green));
    }

    #[test]
    fn unmounted_cycle_is_seeded_consistently() {
        let cycle = Cycle::default();
        assert!(!cycle.is_running());
        assert_consistent(&cycle);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut cycle = mounted();
        assert!(!cycle.poll(at(4999)));
        assert_eq!(cycle.active(), LightColor::Green);
    }

    #[test]
    fn yellow_after_five_seconds() {
        let mut cycle = mounted();
        assert!(cycle.poll(at(5000)));
        assert_eq!(cycle.active(), LightColor::Yellow);
        assert_eq!(cycle.deadline(), Some(at(6000)));
    }

    #[test]
    fn red_after_six_seconds() {
        let mut cycle = mounted();
        assert!(cycle.poll(at(6000)));
        assert_eq!(cycle.active(), LightColor::Red);
        assert_eq!(cycle.index(), 2);
        assert_eq!(cycle.deadline(), Some(at(8000)));
    }

    #[test]
    fn green_again_after_full_cycle() {
        let mut cycle = mounted();
        cycle.poll(at(5000));
        cycle.poll(at(6000));
        assert!(cycle.poll(at(8000)));
        assert_eq!(cycle.active(), LightColor::Green);
        assert_eq!(cycle.index(), 0);
        assert_eq!(cycle.deadline(), Some(at(13000)));
    }

    #[test]
    fn late_poll_does_not_drift() {
        let mut cycle = mounted();
        cycle.poll(at(5300));
        assert_eq!(cycle.active(), LightColor::Yellow);
        assert_eq!(cycle.deadline(), Some(at(6000)));
    }

    #[test]
    fn stop_cancels_pending_transition() {
        let mut cycle = mounted();
        cycle.poll(at(5000));
        let before = cycle.state();

        assert!(cycle.stop());
        assert!(!cycle.is_running());
        assert_eq!(cycle.deadline(), None);

        assert!(!cycle.poll(at(60_000)));
        assert!(!cycle.advance(at(60_000)));
        assert_eq!(cycle.state(), before);
    }

    #[test]
    fn stop_twice_reports_nothing_pending() {
        let mut cycle = mounted();
        assert!(cycle.stop());
        assert!(!cycle.stop());
    }

    #[test]
    fn restart_begins_at_green() {
        let mut cycle = mounted();
        cycle.poll(at(6000));
        cycle.stop();

        cycle.start(at(100_000));
        assert_eq!(cycle.active(), LightColor::Green);
        assert_eq!(cycle.deadline(), Some(at(105_000)));
    }

    #[test]
    fn index_after_k_advances_is_k_mod_n() {
        let tables: [&[Phase]; 3] = [
            &[Phase::from_millis(LightColor::Red, 10)],
            &[
                Phase::from_millis(LightColor::Green, 10),
                Phase::from_millis(LightColor::Red, 30),
            ],
            &crate::DEFAULT_PHASES,
        ];

        for phases in tables {
            let sequence = Sequence::new(phases).unwrap();
            let n = sequence.len();
            let mut cycle = Cycle::new(sequence);
            cycle.start(at(0));

            for k in 1..=(3 * n + 1) {
                let deadline = cycle.deadline().unwrap();
                assert!(cycle.poll(deadline));
                assert_eq!(cycle.index(), k % n);
                assert_consistent(&cycle);
            }
        }
    }

    #[test]
    fn single_phase_reselects_itself() {
        let phases = [Phase::from_millis(LightColor::Yellow, 500)];
        let mut cycle = Cycle::new(Sequence::new(&phases).unwrap());
        cycle.start(at(0));

        assert!(cycle.poll(at(1500)));
        assert_eq!(cycle.index(), 0);
        assert_eq!(cycle.active(), LightColor::Yellow);
        assert_eq!(cycle.deadline(), Some(at(2000)));
    }

    #[test]
    fn catch_up_walks_whole_cycles() {
        let mut cycle = mounted();
        let period = cycle.sequence().period();
        cycle.poll(at(0) + period * 4 + Duration::from_millis(5500));
        assert_eq!(cycle.active(), LightColor::Yellow);
        assert_consistent(&cycle);
    }
}
