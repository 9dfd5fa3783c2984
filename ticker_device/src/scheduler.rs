//! Main control loop.
//!
//! Every iteration the scheduler decides whether a fetch is due, then shows
//! the values and the percentages, each for one hold period. Holds are
//! deadline waits on the intent channel rather than sleeps, so button intents
//! and shutdown are picked up while the display is holding.
//!
//! A fetch is due when the interval since the last one has elapsed and the
//! clock is inside the fetch window, or when a force refresh is pending. The
//! gate is re-armed after every fetch whatever its outcome.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, select};
use log::{debug, error, info, warn};
use ticker_common::{QuoteSet, Result};

use crate::clock::{Clock, FetchWindow};
use crate::display::{Phase, Renderer, Surface};
use crate::fetcher::QuoteSource;

/// Requests delivered to the scheduler thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Fetch at the start of the next iteration, ignoring interval and window.
    ForceRefresh,
    /// Leave the main loop.
    Shutdown,
}

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Shutdown was requested.
    Stop,
}

/// Timing parameters of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Minimum time between scheduled fetches.
    pub interval: Duration,
    /// Hours during which scheduled fetches may run.
    pub window: FetchWindow,
    /// How long each phase stays on screen.
    pub hold: Duration,
    /// Idle time between readiness checks while the display is not set up.
    pub retry_wait: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            window: FetchWindow::default(),
            hold: Duration::from_millis(2000),
            retry_wait: Duration::from_millis(500),
        }
    }
}

/// Interval gate in front of the fetcher.
#[derive(Debug, Clone, Copy)]
pub struct FetchGate {
    interval: Duration,
    last_update: Option<Instant>,
}

impl FetchGate {
    /// Gate that is due immediately and then every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_update: None,
        }
    }

    /// Whether more than the interval has passed since the last fetch.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_update {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        }
    }

    /// Record a fetch attempt at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_update = Some(now);
    }

    /// When the last fetch was attempted.
    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }
}

/// Owns the quote set and drives fetch and render.
pub struct Scheduler<Q, S, C> {
    source: Q,
    renderer: Renderer<S>,
    clock: C,
    config: ScheduleConfig,
    gate: FetchGate,
    quotes: QuoteSet,
    intents: Receiver<Intent>,
    refresh_pending: bool,
}

impl<Q: QuoteSource, S: Surface, C: Clock> Scheduler<Q, S, C> {
    /// Scheduler starting from `quotes` (usually the restored snapshot).
    pub fn new(
        source: Q,
        renderer: Renderer<S>,
        clock: C,
        config: ScheduleConfig,
        quotes: QuoteSet,
        intents: Receiver<Intent>,
    ) -> Self {
        Self {
            source,
            renderer,
            clock,
            config,
            gate: FetchGate::new(config.interval),
            quotes,
            intents,
            refresh_pending: false,
        }
    }

    /// Quotes currently on display.
    pub fn quotes(&self) -> &QuoteSet {
        &self.quotes
    }

    /// The fetch gate.
    pub fn gate(&self) -> &FetchGate {
        &self.gate
    }

    /// The renderer.
    pub fn renderer(&self) -> &Renderer<S> {
        &self.renderer
    }

    /// The quote source.
    pub fn source(&self) -> &Q {
        &self.source
    }

    /// Tear down, giving back the renderer.
    pub fn into_renderer(self) -> Renderer<S> {
        self.renderer
    }

    /// Run until a shutdown intent arrives.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Scheduler running: every {} min between {:02}:00 and {:02}:00",
            self.config.interval.as_secs() / 60,
            self.config.window.start_hour(),
            self.config.window.end_hour()
        );
        while self.iterate() == Flow::Continue {}
        info!("Scheduler stopped");
        Ok(())
    }

    /// One pass: maybe fetch, then show values and percentages.
    pub fn iterate(&mut self) -> Flow {
        if !self.renderer.is_ready() {
            warn!("Device is not ready yet");
            return self.hold(self.config.retry_wait);
        }

        self.refresh_if_due(Instant::now());

        let mut phase = Phase::Values;
        loop {
            if let Err(e) = self.renderer.render(phase, &self.quotes) {
                error!("Failed to render {:?}: {}", phase, e);
            }
            if self.hold(self.config.hold) == Flow::Stop {
                return Flow::Stop;
            }
            phase = phase.next();
            if phase == Phase::Values {
                return Flow::Continue;
            }
        }
    }

    /// Fetch if the gate, window, or a pending force refresh allow it.
    /// Returns whether a fetch was attempted.
    pub fn refresh_if_due(&mut self, now: Instant) -> bool {
        let (hour, minute) = self.clock.hour_minute();
        debug!("The current time is {:02}:{:02}", hour, minute);

        let forced = std::mem::take(&mut self.refresh_pending);
        let scheduled = self.gate.is_due(now) && self.config.window.contains(hour);
        if !forced && !scheduled {
            return false;
        }

        match self.source.fetch() {
            Ok(quotes) => self.quotes = quotes,
            Err(e) => warn!("Refresh failed, keeping previous quotes: {}", e),
        }
        // The interval runs from when the fetch returned, not from when it started.
        self.gate.mark(now.max(Instant::now()));
        true
    }

    /// Wait for `duration`, acting on intents as they arrive.
    pub fn hold(&mut self, duration: Duration) -> Flow {
        let deadline = Instant::now() + duration;
        let intents = self.intents.clone();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            select! {
                recv(intents) -> msg => match msg {
                    Ok(intent) => {
                        if self.handle(intent) == Flow::Stop {
                            return Flow::Stop;
                        }
                    }
                    Err(_) => {
                        thread::sleep(remaining);
                        return Flow::Continue;
                    }
                },
                default(remaining) => return Flow::Continue,
            }
        }
    }

    fn handle(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::ForceRefresh => {
                info!("Refresh requested");
                self.refresh_pending = true;
                Flow::Continue
            }
            Intent::Shutdown => {
                info!("Shutdown requested");
                Flow::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedClock, RecordingSurface, ScriptedSource, other_quotes, sample_quotes};
    use crossbeam_channel::{Sender, unbounded};
    use ticker_common::{FetchError, INSTRUMENTS};

    type TestScheduler = Scheduler<ScriptedSource, RecordingSurface, FixedClock>;

    fn config() -> ScheduleConfig {
        ScheduleConfig {
            hold: Duration::ZERO,
            retry_wait: Duration::ZERO,
            ..ScheduleConfig::default()
        }
    }

    fn scheduler(source: ScriptedSource, hour: u32) -> (TestScheduler, Sender<Intent>) {
        let mut renderer = Renderer::new(RecordingSurface::new(160, 80, 26), INSTRUMENTS);
        renderer.setup().unwrap();
        let (tx, rx) = unbounded();
        let scheduler = Scheduler::new(
            source,
            renderer,
            FixedClock::at(hour, 15),
            config(),
            sample_quotes(),
            rx,
        );
        (scheduler, tx)
    }

    #[test]
    fn first_tick_inside_the_window_fetches() {
        let (mut scheduler, _tx) =
            scheduler(ScriptedSource::answering(vec![Ok(other_quotes())]), 10);
        let now = Instant::now();

        assert!(scheduler.refresh_if_due(now));
        assert_eq!(scheduler.quotes(), &other_quotes());
        assert!(scheduler.gate().last_update() >= Some(now));
    }

    #[test]
    fn gate_is_marked_when_a_slow_fetch_returns() {
        let mut source = ScriptedSource::answering(vec![Ok(other_quotes())]);
        source.delay = Duration::from_millis(200);
        let (mut scheduler, _tx) = scheduler(source, 10);
        let before = Instant::now();

        assert!(scheduler.refresh_if_due(before));
        let after = Instant::now();

        let marked = scheduler.gate().last_update().unwrap();
        assert!(marked >= before + Duration::from_millis(200));
        assert!(marked <= after);
    }

    #[test]
    fn recent_fetch_blocks_the_next_one() {
        let (mut scheduler, _tx) = scheduler(ScriptedSource::default(), 10);
        let now = Instant::now();
        scheduler.gate.mark(now);

        assert!(!scheduler.refresh_if_due(now + Duration::from_secs(60)));
        assert_eq!(scheduler.source().calls, 0);
    }

    #[test]
    fn stale_fetch_inside_the_window_fetches_again() {
        let (mut scheduler, _tx) =
            scheduler(ScriptedSource::answering(vec![Ok(other_quotes())]), 10);
        let start = Instant::now();
        scheduler.gate.mark(start);

        let later = start + Duration::from_secs(31 * 60);
        assert!(scheduler.refresh_if_due(later));
        assert_eq!(scheduler.source().calls, 1);
        assert_eq!(scheduler.gate().last_update(), Some(later));
    }

    #[test]
    fn exactly_one_interval_is_not_yet_due() {
        let mut gate = FetchGate::new(Duration::from_secs(30 * 60));
        let start = Instant::now();
        gate.mark(start);

        assert!(!gate.is_due(start + Duration::from_secs(30 * 60)));
        assert!(gate.is_due(start + Duration::from_secs(30 * 60 + 1)));
    }

    #[test]
    fn outside_the_window_nothing_is_fetched() {
        for hour in [0, 8, 21, 23] {
            let (mut scheduler, _tx) = scheduler(ScriptedSource::default(), hour);

            assert!(!scheduler.refresh_if_due(Instant::now()), "{hour}");
            assert_eq!(scheduler.source().calls, 0);
            assert_eq!(scheduler.gate().last_update(), None);
        }
    }

    #[test]
    fn quota_exceeded_keeps_quotes_and_rearms_the_gate() {
        let (mut scheduler, _tx) = scheduler(
            ScriptedSource::answering(vec![Err(FetchError::Http(429))]),
            10,
        );
        let now = Instant::now();

        assert!(scheduler.refresh_if_due(now));
        assert_eq!(scheduler.quotes(), &sample_quotes());
        assert!(scheduler.gate().last_update() >= Some(now));
        assert!(!scheduler.refresh_if_due(now + Duration::from_secs(1)));
        assert_eq!(scheduler.source().calls, 1);
    }

    #[test]
    fn force_refresh_bypasses_gate_and_window() {
        let (mut scheduler, tx) =
            scheduler(ScriptedSource::answering(vec![Ok(other_quotes())]), 23);
        let now = Instant::now();
        scheduler.gate.mark(now);

        tx.send(Intent::ForceRefresh).unwrap();
        assert_eq!(scheduler.hold(Duration::from_millis(20)), Flow::Continue);

        assert!(scheduler.refresh_if_due(now));
        assert_eq!(scheduler.quotes(), &other_quotes());
        assert!(!scheduler.refresh_if_due(now));
    }

    #[test]
    fn iteration_renders_values_then_percentages() {
        let (mut scheduler, _tx) = scheduler(ScriptedSource::default(), 3);

        assert_eq!(scheduler.iterate(), Flow::Continue);

        let texts: Vec<String> = scheduler
            .renderer()
            .surface()
            .ops
            .iter()
            .filter_map(|op| match op {
                crate::testing::DrawOp::Text {
                    text,
                    datum: crate::display::Datum::TopRight,
                    ..
                } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec!["4,500", "15,000", "34.000", "+0.5%", "-0.7%", "+0.0%"]
        );
    }

    #[test]
    fn failed_fetch_still_renders() {
        let (mut scheduler, _tx) = scheduler(
            ScriptedSource::answering(vec![Err(FetchError::NoNetwork)]),
            10,
        );

        assert_eq!(scheduler.iterate(), Flow::Continue);
        assert_eq!(scheduler.source().calls, 1);
        assert!(scheduler.renderer().surface().ops.len() > 4);
    }

    #[test]
    fn not_ready_display_suspends_fetch_and_render() {
        let renderer = Renderer::new(RecordingSurface::new(160, 80, 26), INSTRUMENTS);
        let (_tx, rx) = unbounded();
        let mut scheduler = Scheduler::new(
            ScriptedSource::answering(vec![Ok(other_quotes())]),
            renderer,
            FixedClock::at(10, 0),
            config(),
            sample_quotes(),
            rx,
        );

        assert_eq!(scheduler.iterate(), Flow::Continue);
        assert_eq!(scheduler.source().calls, 0);
        assert!(scheduler.renderer().surface().ops.is_empty());
    }

    #[test]
    fn shutdown_intent_stops_the_loop() {
        let (mut scheduler, tx) = scheduler(ScriptedSource::default(), 3);
        tx.send(Intent::Shutdown).unwrap();

        assert_eq!(scheduler.run().ok(), Some(()));
    }

    #[test]
    fn closed_channel_just_waits_out_the_hold() {
        let (mut scheduler, tx) = scheduler(ScriptedSource::default(), 3);
        drop(tx);

        let start = Instant::now();
        assert_eq!(scheduler.hold(Duration::from_millis(30)), Flow::Continue);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
