//! Cascading option lookups
//!
//! Which lookups to run is a pure function of how the year/make selection
//! changed. Each lookup kind carries a generation counter so only the newest
//! request of a kind may update its option list; older in-flight requests are
//! aborted and any result they still deliver is dropped.

use super::forms::Selection;
use tokio::task::JoinHandle;

/// Option list a lookup fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Years,
    Makes,
    Models,
}

impl LookupKind {
    fn slot(&self) -> usize {
        match self {
            LookupKind::Years => 0,
            LookupKind::Makes => 1,
            LookupKind::Models => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookupKind::Years => "years",
            LookupKind::Makes => "makes",
            LookupKind::Models => "models",
        }
    }
}

/// A remote lookup with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Years,
    Makes { year: String },
    Models { year: String, make: String },
}

impl LookupRequest {
    pub fn kind(&self) -> LookupKind {
        match self {
            LookupRequest::Years => LookupKind::Years,
            LookupRequest::Makes { .. } => LookupKind::Makes,
            LookupRequest::Models { .. } => LookupKind::Models,
        }
    }
}

/// One step of reacting to a selection change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStep {
    Fetch(LookupRequest),
    /// The selection a pending lookup was issued for is gone
    Cancel(LookupKind),
}

/// Lookups implied by a selection change.
///
/// Makes are requested when the year changed to a non-empty value; models
/// when year or make changed and both are non-empty. When a change leaves a
/// lookup without its inputs, any pending lookup of that kind is cancelled.
/// Downstream selections are left alone.
pub fn plan_lookups(previous: &Selection, next: &Selection) -> Vec<LookupStep> {
    let mut steps = Vec::new();
    let year_changed = previous.year != next.year;
    let make_changed = previous.make != next.make;

    if year_changed {
        if next.year.is_empty() {
            steps.push(LookupStep::Cancel(LookupKind::Makes));
        } else {
            steps.push(LookupStep::Fetch(LookupRequest::Makes {
                year: next.year.clone(),
            }));
        }
    }
    if year_changed || make_changed {
        if next.year.is_empty() || next.make.is_empty() {
            steps.push(LookupStep::Cancel(LookupKind::Models));
        } else {
            steps.push(LookupStep::Fetch(LookupRequest::Models {
                year: next.year.clone(),
                make: next.make.clone(),
            }));
        }
    }
    steps
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: bool,
    handle: Option<JoinHandle<()>>,
}

/// Sequencing state for the three lookup kinds
#[derive(Debug, Default)]
pub struct LookupTracker {
    slots: [Slot; 3],
}

impl LookupTracker {
    /// Start a new request of `kind`, aborting any older one still running.
    /// Returns the generation the result must carry to be accepted.
    pub fn begin(&mut self, kind: LookupKind) -> u64 {
        let slot = &mut self.slots[kind.slot()];
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        slot.generation += 1;
        slot.pending = true;
        slot.generation
    }

    /// Remember the task serving the current generation so it can be aborted
    pub fn attach(&mut self, kind: LookupKind, handle: JoinHandle<()>) {
        self.slots[kind.slot()].handle = Some(handle);
    }

    /// Settle a result. Returns false when it belongs to a superseded request.
    pub fn finish(&mut self, kind: LookupKind, generation: u64) -> bool {
        let slot = &mut self.slots[kind.slot()];
        if slot.generation != generation {
            return false;
        }
        slot.pending = false;
        slot.handle = None;
        true
    }

    pub fn is_pending(&self, kind: LookupKind) -> bool {
        self.slots[kind.slot()].pending
    }

    /// Any lookup still in flight
    pub fn in_flight(&self) -> bool {
        self.slots.iter().any(|s| s.pending)
    }

    /// Abort the request of `kind` and reject whatever it still delivers
    pub fn cancel(&mut self, kind: LookupKind) {
        let slot = &mut self.slots[kind.slot()];
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        slot.generation += 1;
        slot.pending = false;
    }

    /// Abort everything, e.g. on shutdown
    pub fn cancel_all(&mut self) {
        for kind in [LookupKind::Years, LookupKind::Makes, LookupKind::Models] {
            self.cancel(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn sel(year: &str, make: &str) -> Selection {
        Selection {
            year: year.to_string(),
            make: make.to_string(),
        }
    }

    fn makes(year: &str) -> LookupStep {
        LookupStep::Fetch(LookupRequest::Makes { year: year.into() })
    }

    fn models(year: &str, make: &str) -> LookupStep {
        LookupStep::Fetch(LookupRequest::Models {
            year: year.into(),
            make: make.into(),
        })
    }

    #[test]
    fn test_year_chosen_requests_makes_only() {
        assert_eq!(
            plan_lookups(&sel("", ""), &sel("2020", "")),
            vec![makes("2020"), LookupStep::Cancel(LookupKind::Models)]
        );
    }

    #[test]
    fn test_make_chosen_requests_models() {
        assert_eq!(
            plan_lookups(&sel("2020", ""), &sel("2020", "Toyota")),
            vec![models("2020", "Toyota")]
        );
    }

    #[test]
    fn test_year_change_with_make_kept_requests_both() {
        assert_eq!(
            plan_lookups(&sel("2020", "Toyota"), &sel("2021", "Toyota")),
            vec![makes("2021"), models("2021", "Toyota")]
        );
    }

    #[test]
    fn test_unchanged_selection_plans_nothing() {
        assert!(plan_lookups(&sel("2020", "Toyota"), &sel("2020", "Toyota")).is_empty());
        assert!(plan_lookups(&sel("", ""), &sel("", "")).is_empty());
    }

    #[test]
    fn test_cleared_year_cancels_makes_and_models() {
        assert_eq!(
            plan_lookups(&sel("2020", ""), &sel("", "")),
            vec![
                LookupStep::Cancel(LookupKind::Makes),
                LookupStep::Cancel(LookupKind::Models),
            ]
        );
        assert_eq!(
            plan_lookups(&sel("2020", "Toyota"), &sel("", "Toyota")),
            vec![
                LookupStep::Cancel(LookupKind::Makes),
                LookupStep::Cancel(LookupKind::Models),
            ]
        );
    }

    #[test]
    fn test_cleared_make_cancels_models_only() {
        assert_eq!(
            plan_lookups(&sel("2020", "Toyota"), &sel("2020", "")),
            vec![LookupStep::Cancel(LookupKind::Models)]
        );
        // Make without a year never fetches models
        assert_eq!(
            plan_lookups(&sel("", ""), &sel("", "Toyota")),
            vec![LookupStep::Cancel(LookupKind::Models)]
        );
    }

    #[test]
    fn test_request_kinds() {
        assert_eq!(LookupRequest::Years.kind(), LookupKind::Years);
        assert_eq!(
            LookupRequest::Makes { year: "1".into() }.kind(),
            LookupKind::Makes
        );
    }

    #[test]
    fn test_newest_generation_wins() {
        let mut tracker = LookupTracker::default();
        let first = tracker.begin(LookupKind::Makes);
        let second = tracker.begin(LookupKind::Makes);
        assert!(tracker.in_flight());

        // Second resolves first, then the stale first arrives
        assert!(tracker.finish(LookupKind::Makes, second));
        assert!(!tracker.finish(LookupKind::Makes, first));
        assert!(!tracker.in_flight());
    }

    #[test]
    fn test_stale_result_keeps_newer_pending() {
        let mut tracker = LookupTracker::default();
        let first = tracker.begin(LookupKind::Models);
        let _second = tracker.begin(LookupKind::Models);
        assert!(!tracker.finish(LookupKind::Models, first));
        assert!(tracker.is_pending(LookupKind::Models));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut tracker = LookupTracker::default();
        let years = tracker.begin(LookupKind::Years);
        let makes = tracker.begin(LookupKind::Makes);
        assert!(tracker.finish(LookupKind::Years, years));
        assert!(tracker.is_pending(LookupKind::Makes));
        assert!(tracker.finish(LookupKind::Makes, makes));
    }

    #[tokio::test]
    async fn test_begin_aborts_running_task() {
        let mut tracker = LookupTracker::default();
        tracker.begin(LookupKind::Years);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _tx = tx;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        tracker.attach(LookupKind::Years, handle);

        tracker.begin(LookupKind::Years);
        // The sender is dropped without sending once the task is aborted
        let outcome = tokio::time::timeout(Duration::from_secs(5), rx).await;
        assert!(matches!(outcome, Ok(Err(_))));
    }

    #[test]
    fn test_cancel_rejects_pending_result() {
        let mut tracker = LookupTracker::default();
        let makes = tracker.begin(LookupKind::Makes);
        let models = tracker.begin(LookupKind::Models);
        tracker.cancel(LookupKind::Makes);

        assert!(!tracker.is_pending(LookupKind::Makes));
        assert!(!tracker.finish(LookupKind::Makes, makes));
        assert!(tracker.finish(LookupKind::Models, models));
    }

    #[tokio::test]
    async fn test_cancel_aborts_running_task() {
        let mut tracker = LookupTracker::default();
        tracker.begin(LookupKind::Makes);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _tx = tx;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        tracker.attach(LookupKind::Makes, handle);

        tracker.cancel(LookupKind::Makes);
        let outcome = tokio::time::timeout(Duration::from_secs(5), rx).await;
        assert!(matches!(outcome, Ok(Err(_))));
    }

    #[test]
    fn test_cancel_all_invalidates_everything() {
        let mut tracker = LookupTracker::default();
        let years = tracker.begin(LookupKind::Years);
        tracker.cancel_all();
        assert!(!tracker.in_flight());
        assert!(!tracker.finish(LookupKind::Years, years));
    }
}
