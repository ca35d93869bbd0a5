//! Render-wait controller
//!
//! The host page renders client-side and only styles chords that are inside
//! the viewport, with no signal when it is done. Before extraction the
//! controller therefore:
//!
//! 1. waits for the document to load, then lets the host settle
//!    ([`Readiness`]);
//! 2. covers the page with a loading overlay and zooms everything else far
//!    out so the whole song counts as visible, holding that for
//!    `pulse_delay_ms`;
//! 3. restores the page structure, runs the extraction, and fades the
//!    overlay out.
//!
//! All waits are fire-and-forget timers on the page's event loop. There is no
//! cancellation; leaving the page simply drops the pending callbacks.

use crate::config::{Readiness, WaitTimings};
use crate::error::ReflowError;
use std::rc::Rc;

/// One-shot timers
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Page manipulations the controller needs
pub trait PageStage {
    /// Whether the document has finished parsing
    fn is_loaded(&self) -> bool;

    /// Run `callback` once the document has finished parsing
    fn on_loaded(&self, callback: Box<dyn FnOnce()>);

    /// Whether the chord markup container exists yet
    fn content_ready(&self) -> bool;

    fn install_styles(&self) -> Result<(), ReflowError>;

    fn show_overlay(&self) -> Result<(), ReflowError>;

    /// Move the page's content into a wrapper zoomed to `scale`
    fn shrink_content(&self, scale: f64) -> Result<(), ReflowError>;

    /// Move the content back out of the wrapper and drop the wrapper
    fn restore_content(&self) -> Result<(), ReflowError>;

    /// Start the overlay's fade transition
    fn fade_overlay(&self);

    fn remove_overlay(&self);
}

/// Result of the extraction step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The reading view replaced the page
    Installed,
    /// No chord markup; the page stays as it is
    NotApplicable,
}

/// Work run once the page is fully rendered
pub type Extraction = Box<dyn FnOnce() -> Result<Outcome, ReflowError>>;

pub struct RenderWait<S, P> {
    scheduler: S,
    stage: P,
    readiness: Readiness,
    timings: WaitTimings,
}

impl<S, P> RenderWait<S, P>
where
    S: Scheduler + 'static,
    P: PageStage + 'static,
{
    pub fn new(scheduler: S, stage: P, readiness: Readiness, timings: WaitTimings) -> Rc<Self> {
        Rc::new(Self {
            scheduler,
            stage,
            readiness,
            timings,
        })
    }

    /// Begin the wait sequence; `extraction` runs once at the end of it
    pub fn start(self: Rc<Self>, extraction: Extraction) {
        if self.stage.is_loaded() {
            self.settle(extraction);
        } else {
            log::debug!("waiting for the document to load");
            let this = Rc::clone(&self);
            self.stage
                .on_loaded(Box::new(move || this.settle(extraction)));
        }
    }

    fn settle(self: Rc<Self>, extraction: Extraction) {
        match self.readiness {
            Readiness::Fixed => {
                let delay = self.timings.settle_delay_ms;
                log::debug!("letting the page settle for {}ms", delay);
                let this = Rc::clone(&self);
                self.scheduler
                    .schedule(delay, Box::new(move || this.pulse(extraction)));
            }
            Readiness::Poll { interval_ms, max_attempts } => {
                self.poll(interval_ms, max_attempts.max(1), 1, extraction);
            }
        }
    }

    fn poll(self: Rc<Self>, interval_ms: u32, max_attempts: u32, attempt: u32, extraction: Extraction) {
        let this = Rc::clone(&self);
        self.scheduler.schedule(
            interval_ms,
            Box::new(move || {
                if this.stage.content_ready() {
                    log::debug!("chord markup present after {} checks", attempt);
                    this.pulse(extraction);
                } else if attempt >= max_attempts {
                    log::debug!("chord markup still missing after {} checks", attempt);
                    this.pulse(extraction);
                } else {
                    this.poll(interval_ms, max_attempts, attempt + 1, extraction);
                }
            }),
        );
    }

    fn pulse(self: Rc<Self>, extraction: Extraction) {
        if let Err(err) = self
            .stage
            .install_styles()
            .and_then(|()| self.stage.show_overlay())
        {
            log::warn!("loading overlay unavailable, leaving the page alone: {}", err);
            return;
        }

        if let Err(err) = self.stage.shrink_content(self.timings.zoom_scale) {
            log::warn!("could not zoom the page out: {}", err);
        }

        log::debug!("holding zoomed page for {}ms", self.timings.pulse_delay_ms);
        let this = Rc::clone(&self);
        self.scheduler.schedule(
            self.timings.pulse_delay_ms,
            Box::new(move || this.finish(extraction)),
        );
    }

    fn finish(self: Rc<Self>, extraction: Extraction) {
        // Selectors in the extraction expect the original structure
        if let Err(err) = self.stage.restore_content() {
            log::warn!("could not unwrap the page content: {}", err);
        }

        match extraction() {
            Ok(Outcome::Installed) => log::info!("reading view installed"),
            Ok(Outcome::NotApplicable) => log::info!("no chord markup found, page left unchanged"),
            Err(err) => log::warn!("reading view not installed: {}", err),
        }

        self.stage.fade_overlay();
        let this = Rc::clone(&self);
        self.scheduler.schedule(
            self.timings.fade_delay_ms,
            Box::new(move || this.stage.remove_overlay()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    type Task = Box<dyn FnOnce()>;

    #[derive(Default)]
    struct Timeline {
        now: u64,
        seq: u64,
        pending: Vec<(u64, u64, Task)>,
    }

    /// Virtual clock; tasks run only when the test advances time
    #[derive(Default, Clone)]
    struct ManualScheduler {
        timeline: Rc<RefCell<Timeline>>,
    }

    impl ManualScheduler {
        fn now(&self) -> u64 {
            self.timeline.borrow().now
        }

        fn pending(&self) -> usize {
            self.timeline.borrow().pending.len()
        }

        fn advance(&self, ms: u64) {
            let target = self.now() + ms;
            loop {
                let next = {
                    let mut timeline = self.timeline.borrow_mut();
                    let due_index = timeline
                        .pending
                        .iter()
                        .enumerate()
                        .filter(|(_, (due, _, _))| *due <= target)
                        .min_by_key(|(_, (due, seq, _))| (*due, *seq))
                        .map(|(i, _)| i);
                    match due_index {
                        Some(i) => {
                            let (due, _, task) = timeline.pending.remove(i);
                            timeline.now = due;
                            Some(task)
                        }
                        None => {
                            timeline.now = target;
                            None
                        }
                    }
                };
                match next {
                    Some(task) => task(),
                    None => break,
                }
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Task) {
            let mut timeline = self.timeline.borrow_mut();
            let due = timeline.now + u64::from(delay_ms);
            let seq = timeline.seq;
            timeline.seq += 1;
            timeline.pending.push((due, seq, task));
        }
    }

    #[derive(Default)]
    struct StageState {
        events: RefCell<Vec<(u64, String)>>,
        loaded: Cell<bool>,
        on_loaded: RefCell<Option<Task>>,
        ready_after_checks: Cell<Option<u32>>,
        checks: Cell<u32>,
        fail_overlay: Cell<bool>,
        fail_shrink: Cell<bool>,
    }

    /// Records every page manipulation with its virtual timestamp
    #[derive(Clone)]
    struct RecordingStage {
        clock: ManualScheduler,
        state: Rc<StageState>,
    }

    impl RecordingStage {
        fn new(clock: &ManualScheduler) -> Self {
            let stage = Self {
                clock: clock.clone(),
                state: Rc::new(StageState::default()),
            };
            stage.state.loaded.set(true);
            stage
        }

        fn record(&self, event: impl Into<String>) {
            self.state
                .events
                .borrow_mut()
                .push((self.clock.now(), event.into()));
        }

        fn events(&self) -> Vec<(u64, String)> {
            self.state.events.borrow().clone()
        }

        fn names(&self) -> Vec<String> {
            self.events().into_iter().map(|(_, name)| name).collect()
        }

        fn fire_loaded(&self) {
            self.state.loaded.set(true);
            let callback = self.state.on_loaded.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        }
    }

    impl PageStage for RecordingStage {
        fn is_loaded(&self) -> bool {
            self.state.loaded.get()
        }

        fn on_loaded(&self, callback: Task) {
            *self.state.on_loaded.borrow_mut() = Some(callback);
        }

        fn content_ready(&self) -> bool {
            let checks = self.state.checks.get() + 1;
            self.state.checks.set(checks);
            self.record("check");
            self.state
                .ready_after_checks
                .get()
                .is_some_and(|needed| checks >= needed)
        }

        fn install_styles(&self) -> Result<(), ReflowError> {
            self.record("styles");
            Ok(())
        }

        fn show_overlay(&self) -> Result<(), ReflowError> {
            if self.state.fail_overlay.get() {
                return Err(ReflowError::MissingElement("body"));
            }
            self.record("overlay");
            Ok(())
        }

        fn shrink_content(&self, scale: f64) -> Result<(), ReflowError> {
            if self.state.fail_shrink.get() {
                return Err(ReflowError::Dom("appendChild failed".to_string()));
            }
            self.record(format!("shrink {}", scale));
            Ok(())
        }

        fn restore_content(&self) -> Result<(), ReflowError> {
            self.record("restore");
            Ok(())
        }

        fn fade_overlay(&self) {
            self.record("fade");
        }

        fn remove_overlay(&self) {
            self.record("remove");
        }
    }

    fn extraction(stage: &RecordingStage, outcome: Result<Outcome, ReflowError>) -> Extraction {
        let stage = stage.clone();
        Box::new(move || {
            stage.record("extract");
            outcome
        })
    }

    fn controller(
        clock: &ManualScheduler,
        stage: &RecordingStage,
        readiness: Readiness,
    ) -> Rc<RenderWait<ManualScheduler, RecordingStage>> {
        RenderWait::new(clock.clone(), stage.clone(), readiness, WaitTimings::default())
    }

    fn at(time: u64, name: &str) -> (u64, String) {
        (time, name.to_string())
    }

    #[test]
    fn test_fixed_sequence_timeline() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        controller(&clock, &stage, Readiness::Fixed)
            .start(extraction(&stage, Ok(Outcome::Installed)));

        clock.advance(999);
        assert!(stage.events().is_empty());

        clock.advance(1);
        assert_eq!(
            stage.events(),
            vec![at(1000, "styles"), at(1000, "overlay"), at(1000, "shrink 0.1")]
        );

        clock.advance(499);
        assert_eq!(stage.events().len(), 3);

        clock.advance(1);
        clock.advance(399);
        assert_eq!(
            stage.events()[3..].to_vec(),
            vec![at(1500, "restore"), at(1500, "extract"), at(1500, "fade")]
        );

        clock.advance(1);
        assert_eq!(stage.events().last(), Some(&at(1900, "remove")));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_waits_for_document_load() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        stage.state.loaded.set(false);

        controller(&clock, &stage, Readiness::Fixed)
            .start(extraction(&stage, Ok(Outcome::Installed)));

        clock.advance(5000);
        assert!(stage.events().is_empty());
        assert_eq!(clock.pending(), 0);

        stage.fire_loaded();
        clock.advance(1000);
        assert_eq!(stage.events()[0], at(6000, "styles"));
    }

    #[test]
    fn test_not_applicable_still_removes_overlay() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        controller(&clock, &stage, Readiness::Fixed)
            .start(extraction(&stage, Ok(Outcome::NotApplicable)));

        clock.advance(10_000);
        assert_eq!(
            stage.names(),
            vec!["styles", "overlay", "shrink 0.1", "restore", "extract", "fade", "remove"]
        );
    }

    #[test]
    fn test_extraction_error_still_removes_overlay() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        controller(&clock, &stage, Readiness::Fixed)
            .start(extraction(&stage, Err(ReflowError::NoDocument)));

        clock.advance(10_000);
        assert_eq!(stage.names().last().map(String::as_str), Some("remove"));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_overlay_failure_aborts_before_touching_page() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        stage.state.fail_overlay.set(true);

        controller(&clock, &stage, Readiness::Fixed)
            .start(extraction(&stage, Ok(Outcome::Installed)));

        clock.advance(10_000);
        assert_eq!(stage.names(), vec!["styles"]);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_shrink_failure_continues() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        stage.state.fail_shrink.set(true);

        controller(&clock, &stage, Readiness::Fixed)
            .start(extraction(&stage, Ok(Outcome::Installed)));

        clock.advance(10_000);
        assert_eq!(
            stage.names(),
            vec!["styles", "overlay", "restore", "extract", "fade", "remove"]
        );
    }

    #[test]
    fn test_poll_proceeds_when_content_appears() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);
        stage.state.ready_after_checks.set(Some(3));

        let readiness = Readiness::Poll { interval_ms: 100, max_attempts: 10 };
        controller(&clock, &stage, readiness).start(extraction(&stage, Ok(Outcome::Installed)));

        clock.advance(300);
        assert_eq!(
            stage.events(),
            vec![
                at(100, "check"),
                at(200, "check"),
                at(300, "check"),
                at(300, "styles"),
                at(300, "overlay"),
                at(300, "shrink 0.1"),
            ]
        );

        clock.advance(500);
        assert!(stage.names().contains(&"extract".to_string()));
    }

    #[test]
    fn test_poll_gives_up_after_max_attempts() {
        let clock = ManualScheduler::default();
        let stage = RecordingStage::new(&clock);

        let readiness = Readiness::Poll { interval_ms: 250, max_attempts: 4 };
        controller(&clock, &stage, readiness).start(extraction(&stage, Ok(Outcome::NotApplicable)));

        clock.advance(10_000);
        let events = stage.events();
        assert_eq!(events.iter().filter(|(_, name)| name == "check").count(), 4);
        assert!(events.contains(&at(1000, "overlay")));
        assert!(events.contains(&at(1500, "extract")));
        assert!(events.contains(&at(1900, "remove")));
    }
}
