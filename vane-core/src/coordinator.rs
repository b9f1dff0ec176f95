//! Watch face coordinator
//!
//! The coordinator is the central brain that:
//! - Turns minute ticks into time text
//! - Asks the refresh scheduler whether weather is due and sends triggers
//! - Decodes inbound weather batches into the display composer
//! - Feeds delivery outcomes back into the refresh state machine
//!
//! It owns every component and every buffer; the host run loop owns the
//! coordinator and hands it one [`Event`] at a time.

use vane_protocol::{decode_batch, encode_trigger, DecodedEntry, RequestId, WeatherField};

use crate::clock::{ClockSource, Timestamp};
use crate::compose::DisplayComposer;
use crate::config::{ConfigError, VaneConfig};
use crate::diagnostics::{bump, Diagnostics};
use crate::event::Event;
use crate::refresh::{OutcomeDisposition, RefreshScheduler, RefreshState};
use crate::traits::{Renderer, SendFailure, TickService, Transport, TransportError};

/// Coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Not accepting events
    Stopped,
    /// Accepting events, companion link open
    Running,
    /// Accepting events, companion link could not be opened
    ///
    /// The link is reopened on each due refresh minute; the first success
    /// moves to `Running`.
    ClockOnly,
}

/// Watch face coordinator
pub struct Coordinator<T: Transport, K: TickService, R: Renderer> {
    /// Companion link
    transport: T,
    /// System clock and tick subscription
    ticks: K,
    /// Display layer
    renderer: R,
    /// Timestamp to sample conversion
    clock: ClockSource,
    /// Weather refresh state machine
    scheduler: RefreshScheduler,
    /// Text buffers and weather snapshot
    composer: DisplayComposer,
    /// Failure counters
    diagnostics: Diagnostics,
    /// Current lifecycle state
    lifecycle: Lifecycle,
}

impl<T: Transport, K: TickService, R: Renderer> Coordinator<T, K, R> {
    /// Create a stopped coordinator
    pub fn new(config: VaneConfig, transport: T, ticks: K, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            transport,
            ticks,
            renderer,
            clock: ClockSource::with_override(config.hour_format_override),
            scheduler: RefreshScheduler::new(config.refresh_interval_min),
            composer: DisplayComposer::new(),
            diagnostics: Diagnostics::default(),
            lifecycle: Lifecycle::Stopped,
        })
    }

    /// Start the watch face
    ///
    /// Events are accepted from the moment this is called, before the
    /// transport is opened, so no inbound message can be missed. The time is
    /// rendered immediately.
    ///
    /// If the transport cannot be opened the clock still runs and the error
    /// is returned; the link is retried on each due refresh minute.
    pub fn start(&mut self) -> Result<(), TransportError> {
        if self.lifecycle != Lifecycle::Stopped {
            return Ok(());
        }

        // Handlers live from here on
        self.lifecycle = Lifecycle::ClockOnly;
        self.ticks.subscribe_minutes();

        let opened = self.transport.open();
        match opened {
            Ok(()) => self.lifecycle = Lifecycle::Running,
            Err(e) => {
                bump(&mut self.diagnostics.open_failures);
                error!("Failed to open companion link: {:?}", e);
            }
        }

        self.composer.render_weather(&mut self.renderer);
        let now = self.ticks.now();
        let use_24h = self.ticks.is_24h_style();
        self.update_time(now, use_24h);

        info!("Watch face started");
        opened
    }

    /// Stop the watch face and release everything `start` acquired
    pub fn stop(&mut self) {
        let lifecycle = self.lifecycle;
        if lifecycle == Lifecycle::Stopped {
            return;
        }

        self.ticks.unsubscribe();
        if lifecycle == Lifecycle::Running {
            self.transport.close();
        }
        self.scheduler.reset();
        self.composer.reset();
        self.lifecycle = Lifecycle::Stopped;

        info!("Watch face stopped");
    }

    /// Process one event from the host run loop
    pub fn handle(&mut self, event: Event<'_>) {
        if self.lifecycle == Lifecycle::Stopped {
            trace!("Ignoring event while stopped");
            return;
        }

        match event {
            Event::Tick { now, use_24h } => self.on_tick(now, use_24h),
            Event::Inbound(bytes) => self.on_inbound(bytes),
            Event::InboundDropped(reason) => {
                bump(&mut self.diagnostics.inbound_dropped);
                error!("Message dropped: {:?}", reason);
            }
            Event::OutboxSent(id) => self.on_outcome(id, None),
            Event::OutboxFailed(id, reason) => self.on_outcome(id, Some(reason)),
        }
    }

    /// Get current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Check if events are being accepted
    pub fn is_running(&self) -> bool {
        self.lifecycle != Lifecycle::Stopped
    }

    /// Get current refresh state
    pub fn refresh_state(&self) -> RefreshState {
        self.scheduler.state()
    }

    /// Get failure counters
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Get the display composer
    pub fn composer(&self) -> &DisplayComposer {
        &self.composer
    }

    /// Get the renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Get the tick service
    pub fn ticks(&self) -> &K {
        &self.ticks
    }

    fn update_time(&mut self, now: Timestamp, use_24h: bool) -> u8 {
        let sample = self.clock.sample(now, use_24h);
        self.composer.on_tick(&sample, &mut self.renderer);
        sample.minute()
    }

    fn on_tick(&mut self, now: Timestamp, use_24h: bool) {
        let minute = self.update_time(now, use_24h);
        if !self.scheduler.is_due(minute) {
            return;
        }

        if self.lifecycle == Lifecycle::ClockOnly && !self.reopen_link() {
            return;
        }

        let abandoned = self.scheduler.state().request_id();
        let Some(id) = self.scheduler.on_tick(minute) else {
            return;
        };
        if let Some(old) = abandoned {
            bump(&mut self.diagnostics.timed_out_requests);
            warn!("Request {:?} never reported back, superseded by {:?}", old, id);
        }

        let request = encode_trigger(id);
        match self.transport.send(&request) {
            Ok(()) => {
                self.scheduler.send_accepted(id);
                bump(&mut self.diagnostics.requests_sent);
                debug!("Weather request {:?} queued", id);
            }
            Err(e) => {
                self.scheduler.send_rejected(id);
                bump(&mut self.diagnostics.send_failures);
                error!(
                    "Outbox send failed: {:?} ({} in a row)",
                    e,
                    self.scheduler.consecutive_failures()
                );
            }
        }
    }

    fn reopen_link(&mut self) -> bool {
        match self.transport.open() {
            Ok(()) => {
                self.lifecycle = Lifecycle::Running;
                info!("Companion link opened");
                true
            }
            Err(e) => {
                bump(&mut self.diagnostics.open_failures);
                warn!("Companion link still unavailable: {:?}", e);
                false
            }
        }
    }

    fn on_inbound(&mut self, bytes: &[u8]) {
        bump(&mut self.diagnostics.batches_received);

        let diagnostics = &mut self.diagnostics;
        let fields = decode_batch(bytes).filter_map(|entry| triage(entry, diagnostics));
        let merged = self.composer.on_weather_batch(fields, &mut self.renderer);

        debug!("Weather batch merged {} fields", merged);
    }

    fn on_outcome(&mut self, id: RequestId, failure: Option<SendFailure>) {
        let disposition = self.scheduler.on_outcome(id, failure.is_none());
        if disposition == OutcomeDisposition::Stale {
            bump(&mut self.diagnostics.stale_outcomes);
            warn!("Outcome for request {:?} matches nothing in flight", id);
            return;
        }

        match failure {
            None => {
                bump(&mut self.diagnostics.requests_delivered);
                info!("Outbox send success!");
            }
            Some(reason) => {
                bump(&mut self.diagnostics.send_failures);
                error!(
                    "Outbox send failed: {:?} ({} in a row)",
                    reason,
                    self.scheduler.consecutive_failures()
                );
            }
        }
    }
}

impl<T: Transport, K: TickService, R: Renderer> Drop for Coordinator<T, K, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Keep weather fields, count and log everything else
fn triage(entry: DecodedEntry, diagnostics: &mut Diagnostics) -> Option<WeatherField> {
    match entry {
        DecodedEntry::Field(field) => Some(field),
        DecodedEntry::UnknownKey(key) => {
            bump(&mut diagnostics.unknown_keys);
            warn!("Key {} not recognized", key);
            None
        }
        DecodedEntry::Invalid { key, error } => {
            bump(&mut diagnostics.field_errors);
            warn!("Key {} has unusable value: {:?}", key, error);
            None
        }
        DecodedEntry::Malformed(error) => {
            bump(&mut diagnostics.malformed_batches);
            warn!("Inbound batch malformed: {:?}", error);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::LOADING_TEXT;
    use crate::testing::{ManualTicks, RecordingRenderer, ScriptedTransport};
    use crate::traits::{DropReason, Region};
    use vane_protocol::{encode_weather, DictWriter, KEY_CONDITIONS, KEY_TEMPERATURE};

    type TestCoordinator = Coordinator<ScriptedTransport, ManualTicks, RecordingRenderer>;

    const DAY: u64 = 20_000;

    fn coordinator_at(hour: u8, minute: u8) -> TestCoordinator {
        let ticks = ManualTicks::new(Timestamp::from_day_time(DAY, hour, minute), true);
        Coordinator::new(
            VaneConfig::default(),
            ScriptedTransport::default(),
            ticks,
            RecordingRenderer::default(),
        )
        .unwrap()
    }

    fn tick(hour: u8, minute: u8) -> Event<'static> {
        Event::Tick {
            now: Timestamp::from_day_time(DAY, hour, minute),
            use_24h: true,
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = VaneConfig {
            refresh_interval_min: 0,
            ..Default::default()
        };
        let result = Coordinator::new(
            config,
            ScriptedTransport::default(),
            ManualTicks::new(Timestamp(0), true),
            RecordingRenderer::default(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRefreshInterval(0))
        ));
    }

    #[test]
    fn test_start_renders_time_immediately() {
        let mut coordinator = coordinator_at(7, 42);
        coordinator.start().unwrap();

        assert_eq!(coordinator.lifecycle(), Lifecycle::Running);
        assert!(coordinator.ticks().subscribed);
        assert!(coordinator.transport().is_open);
        assert_eq!(coordinator.renderer().last(Region::Time), Some("07:42"));
        assert_eq!(
            coordinator.renderer().last(Region::Weather),
            Some(LOADING_TEXT)
        );
    }

    #[test]
    fn test_start_pushes_no_placeholder_time() {
        let mut coordinator = coordinator_at(7, 42);
        coordinator.start().unwrap();

        let times: std::vec::Vec<&str> = coordinator
            .renderer()
            .calls
            .iter()
            .filter(|(region, _)| *region == Region::Time)
            .map(|(_, text)| text.as_str())
            .collect();
        assert_eq!(times, ["07:42"]);
    }

    #[test]
    fn test_start_does_not_request_weather() {
        let mut coordinator = coordinator_at(12, 0);
        coordinator.start().unwrap();

        assert!(coordinator.transport().sent.is_empty());
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
    }

    #[test]
    fn test_events_ignored_before_start() {
        let mut coordinator = coordinator_at(9, 0);
        coordinator.handle(tick(9, 30));

        assert!(coordinator.renderer().calls.is_empty());
        assert!(coordinator.transport().sent.is_empty());
    }

    #[test]
    fn test_refresh_cycle_scenario() {
        let mut coordinator = coordinator_at(10, 29);
        coordinator.start().unwrap();

        coordinator.handle(tick(10, 30));
        let sent = &coordinator.transport().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].as_bytes(), &[1, 0, 0, 0, 0, 2, 1, 0, 0]);
        let id = sent[0].id();
        assert_eq!(coordinator.refresh_state(), RefreshState::InFlight(id));

        let batch = encode_weather(Some(21), Some("Sunny")).unwrap();
        coordinator.handle(Event::Inbound(&batch));
        assert_eq!(coordinator.composer().weather_text(), "21C, Sunny");
        assert_eq!(
            coordinator.renderer().last(Region::Weather),
            Some("21C, Sunny")
        );

        coordinator.handle(Event::OutboxSent(id));
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
        assert_eq!(coordinator.diagnostics().requests_delivered, 1);
    }

    #[test]
    fn test_tick_updates_time_without_touching_weather() {
        let mut coordinator = coordinator_at(10, 0);
        coordinator.start().unwrap();
        let batch = encode_weather(Some(5), Some("Fog")).unwrap();
        coordinator.handle(Event::Inbound(&batch));

        coordinator.handle(tick(10, 1));

        assert_eq!(coordinator.renderer().last(Region::Time), Some("10:01"));
        assert_eq!(coordinator.composer().weather_text(), "5C, Fog");
    }

    #[test]
    fn test_in_flight_ignores_minutes_between_refreshes() {
        let mut coordinator = coordinator_at(10, 59);
        coordinator.start().unwrap();

        coordinator.handle(tick(11, 0));
        coordinator.handle(tick(11, 1));
        coordinator.handle(tick(11, 29));

        assert_eq!(coordinator.transport().sent.len(), 1);
        assert!(matches!(
            coordinator.refresh_state(),
            RefreshState::InFlight(_)
        ));
    }

    #[test]
    fn test_lost_outcome_superseded_by_next_refresh() {
        let mut coordinator = coordinator_at(9, 59);
        coordinator.start().unwrap();

        coordinator.handle(tick(10, 0));
        let lost = coordinator.transport().sent[0].id();

        // No outcome ever arrives for the first request
        for minute in 1..=30 {
            coordinator.handle(tick(10, minute));
        }

        let sent = &coordinator.transport().sent;
        assert_eq!(sent.len(), 2);
        let fresh = sent[1].id();
        assert_ne!(fresh, lost);
        assert_eq!(coordinator.refresh_state(), RefreshState::InFlight(fresh));
        assert_eq!(coordinator.diagnostics().timed_out_requests, 1);

        // A late report for the abandoned request is stale
        coordinator.handle(Event::OutboxSent(lost));
        assert_eq!(coordinator.diagnostics().stale_outcomes, 1);
        assert_eq!(coordinator.refresh_state(), RefreshState::InFlight(fresh));

        coordinator.handle(Event::OutboxSent(fresh));
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
    }

    #[test]
    fn test_silent_companion_keeps_getting_requests() {
        let mut coordinator = coordinator_at(9, 59);
        coordinator.start().unwrap();

        let mut now = Timestamp::from_day_time(DAY, 9, 59);
        for _ in 0..(26 * 60) {
            now = now.plus_minutes(1);
            coordinator.handle(Event::Tick { now, use_24h: true });
        }

        // One request per half hour, never more than one outstanding
        assert_eq!(coordinator.transport().sent.len(), 52);
        assert_eq!(coordinator.refresh_state().outstanding(), 1);
        assert_eq!(coordinator.diagnostics().timed_out_requests, 51);
    }

    #[test]
    fn test_failed_delivery_retries_on_next_due_tick() {
        let mut coordinator = coordinator_at(13, 59);
        coordinator.start().unwrap();

        coordinator.handle(tick(14, 0));
        let first = coordinator.transport().sent[0].id();
        coordinator.handle(Event::OutboxFailed(first, SendFailure::Timeout));
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
        assert_eq!(coordinator.diagnostics().send_failures, 1);

        // Ticks in between do not retry
        coordinator.handle(tick(14, 1));
        coordinator.handle(tick(14, 29));
        assert_eq!(coordinator.transport().sent.len(), 1);

        coordinator.handle(tick(14, 30));
        assert_eq!(coordinator.transport().sent.len(), 2);
        assert_ne!(coordinator.transport().sent[1].id(), first);
    }

    #[test]
    fn test_rejected_send_returns_to_idle() {
        let mut coordinator = coordinator_at(15, 59);
        coordinator.start().unwrap();
        coordinator.transport_mut().reject_next = Some(TransportError::Busy);

        coordinator.handle(tick(16, 0));

        assert!(coordinator.transport().sent.is_empty());
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
        assert_eq!(coordinator.diagnostics().send_failures, 1);

        coordinator.handle(tick(16, 30));
        assert_eq!(coordinator.transport().sent.len(), 1);
    }

    #[test]
    fn test_stale_outcome_counted() {
        let mut coordinator = coordinator_at(8, 0);
        coordinator.start().unwrap();

        coordinator.handle(Event::OutboxSent(RequestId(99)));

        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
        assert_eq!(coordinator.diagnostics().stale_outcomes, 1);
    }

    #[test]
    fn test_conditions_only_shows_loading() {
        let mut coordinator = coordinator_at(8, 0);
        coordinator.start().unwrap();

        let batch = encode_weather(None, Some("Rainy")).unwrap();
        coordinator.handle(Event::Inbound(&batch));

        assert_eq!(coordinator.composer().weather_text(), LOADING_TEXT);
    }

    #[test]
    fn test_unknown_key_does_not_abort_batch() {
        let mut coordinator = coordinator_at(8, 0);
        coordinator.start().unwrap();

        let mut writer = DictWriter::<64>::new().unwrap();
        writer.write_int32(KEY_TEMPERATURE, 17).unwrap();
        writer.write_uint8(5, 1).unwrap();
        writer.write_cstring(KEY_CONDITIONS, "Breezy").unwrap();
        let batch = writer.finish();
        coordinator.handle(Event::Inbound(&batch));

        assert_eq!(coordinator.diagnostics().unknown_keys, 1);
        assert_eq!(coordinator.composer().weather_text(), "17C, Breezy");
    }

    #[test]
    fn test_bad_field_keeps_sticky_value() {
        let mut coordinator = coordinator_at(8, 0);
        coordinator.start().unwrap();
        let batch = encode_weather(Some(20), Some("Clear")).unwrap();
        coordinator.handle(Event::Inbound(&batch));

        let mut writer = DictWriter::<64>::new().unwrap();
        writer.write_cstring(KEY_TEMPERATURE, "warm").unwrap();
        writer.write_cstring(KEY_CONDITIONS, "Cloudy").unwrap();
        let batch = writer.finish();
        coordinator.handle(Event::Inbound(&batch));

        assert_eq!(coordinator.diagnostics().field_errors, 1);
        assert_eq!(coordinator.composer().weather_text(), "20C, Cloudy");
    }

    #[test]
    fn test_malformed_batch_applies_decoded_prefix() {
        let mut coordinator = coordinator_at(8, 0);
        coordinator.start().unwrap();
        let first = encode_weather(Some(3), Some("Sleet")).unwrap();
        coordinator.handle(Event::Inbound(&first));

        let batch = encode_weather(Some(4), Some("Snow")).unwrap();
        coordinator.handle(Event::Inbound(&batch[..batch.len() - 2]));

        assert_eq!(coordinator.diagnostics().malformed_batches, 1);
        assert_eq!(coordinator.composer().weather_text(), "4C, Sleet");
    }

    #[test]
    fn test_dropped_inbound_changes_nothing() {
        let mut coordinator = coordinator_at(8, 0);
        coordinator.start().unwrap();
        let calls = coordinator.renderer().calls.len();

        coordinator.handle(Event::InboundDropped(DropReason::BufferOverflow));

        assert_eq!(coordinator.diagnostics().inbound_dropped, 1);
        assert_eq!(coordinator.renderer().calls.len(), calls);
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
    }

    #[test]
    fn test_unsolicited_weather_accepted_when_idle() {
        let mut coordinator = coordinator_at(8, 5);
        coordinator.start().unwrap();

        let batch = encode_weather(Some(-3), Some("Snow")).unwrap();
        coordinator.handle(Event::Inbound(&batch));

        assert_eq!(coordinator.composer().weather_text(), "-3C, Snow");
    }

    #[test]
    fn test_open_failure_keeps_clock_running() {
        let mut coordinator = coordinator_at(6, 29);
        coordinator.transport_mut().fail_open = Some(TransportError::OpenFailed);

        assert_eq!(coordinator.start(), Err(TransportError::OpenFailed));
        assert_eq!(coordinator.lifecycle(), Lifecycle::ClockOnly);

        coordinator.handle(tick(6, 30));
        assert_eq!(coordinator.renderer().last(Region::Time), Some("06:30"));
        assert_eq!(coordinator.lifecycle(), Lifecycle::ClockOnly);
        assert_eq!(coordinator.diagnostics().open_failures, 2);
        assert!(coordinator.transport().sent.is_empty());
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
    }

    #[test]
    fn test_link_reopened_on_due_minute() {
        let mut coordinator = coordinator_at(6, 29);
        coordinator.transport_mut().fail_open = Some(TransportError::OpenFailed);
        assert!(coordinator.start().is_err());

        coordinator.transport_mut().fail_open = None;

        // Minutes between refreshes do not touch the link
        coordinator.handle(tick(6, 31));
        assert_eq!(coordinator.transport().opened, 0);

        coordinator.handle(tick(7, 0));
        assert_eq!(coordinator.lifecycle(), Lifecycle::Running);
        assert_eq!(coordinator.transport().opened, 1);
        assert_eq!(coordinator.transport().sent.len(), 1);

        coordinator.stop();
        assert_eq!(coordinator.transport().closed, 1);
    }

    #[test]
    fn test_stop_releases_everything() {
        let mut coordinator = coordinator_at(9, 59);
        coordinator.start().unwrap();
        coordinator.handle(tick(10, 0));
        let batch = encode_weather(Some(11), Some("Hail")).unwrap();
        coordinator.handle(Event::Inbound(&batch));

        coordinator.stop();

        assert_eq!(coordinator.lifecycle(), Lifecycle::Stopped);
        assert!(!coordinator.ticks().subscribed);
        assert!(!coordinator.transport().is_open);
        assert_eq!(coordinator.transport().closed, 1);
        assert_eq!(coordinator.refresh_state(), RefreshState::Idle);
        assert_eq!(coordinator.composer().weather_text(), LOADING_TEXT);

        // Second stop is a no-op
        coordinator.stop();
        assert_eq!(coordinator.transport().closed, 1);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut coordinator = coordinator_at(9, 0);
        coordinator.start().unwrap();
        coordinator.stop();
        coordinator.start().unwrap();

        assert_eq!(coordinator.transport().opened, 2);
        assert_eq!(coordinator.ticks().subscriptions, 2);
        assert!(coordinator.is_running());
    }

    #[test]
    fn test_drop_while_running_releases() {
        use std::rc::Rc;
        use std::cell::Cell;

        let closed = Rc::new(Cell::new(false));
        let unsubscribed = Rc::new(Cell::new(false));

        struct Link(Rc<Cell<bool>>);
        impl Transport for Link {
            fn open(&mut self) -> Result<(), TransportError> {
                Ok(())
            }
            fn close(&mut self) {
                self.0.set(true);
            }
            fn send(&mut self, _: &vane_protocol::OutboundRequest) -> Result<(), TransportError> {
                Ok(())
            }
        }

        struct Ticks(Rc<Cell<bool>>);
        impl TickService for Ticks {
            fn now(&self) -> Timestamp {
                Timestamp(0)
            }
            fn is_24h_style(&self) -> bool {
                true
            }
            fn subscribe_minutes(&mut self) {}
            fn unsubscribe(&mut self) {
                self.0.set(true);
            }
        }

        {
            let mut coordinator = Coordinator::new(
                VaneConfig::default(),
                Link(closed.clone()),
                Ticks(unsubscribed.clone()),
                RecordingRenderer::default(),
            )
            .unwrap();
            coordinator.start().unwrap();
        }

        assert!(closed.get());
        assert!(unsubscribed.get());
    }
}
