use super::enums::ItemStatus;
use super::pause::PauseState;
use chrono::{DateTime, Duration, Utc};

/// A checklist item belonging to a task.
///
/// `created_at` changes meaning with the status: creation time while
/// `NotStarted`, anchor of the running interval while `Started`, and start of
/// the completed interval once `Done`. `checked_at` is present only while
/// `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Store identity (0 until the item has been persisted)
    pub id: i64,
    pub task_id: i64,
    pub text: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub checked_at: Option<DateTime<Utc>>,
    /// Accumulated time that is not currently running
    pub frozen_duration: Duration,
}

impl Item {
    pub fn new(task_id: i64, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            task_id,
            text,
            status: ItemStatus::NotStarted,
            created_at: now,
            checked_at: None,
            frozen_duration: Duration::zero(),
        }
    }

    /// Advance through NotStarted -> Started -> Done -> NotStarted
    pub fn toggle_status(&mut self, now: DateTime<Utc>, pause: &PauseState) {
        match self.status {
            ItemStatus::NotStarted => self.start(now, pause),
            ItemStatus::Started => self.mark_done(now, pause),
            ItemStatus::Done => self.reopen(),
        }
    }

    /// Start (or resume) the item, carrying over previously accumulated time
    fn start(&mut self, now: DateTime<Utc>, pause: &PauseState) {
        // While paused, item clocks stand still at the pause instant
        let anchor = pause.paused_at().unwrap_or(now);
        self.status = ItemStatus::Started;
        self.created_at = anchor - self.frozen_duration;
        self.checked_at = None;
    }

    fn mark_done(&mut self, now: DateTime<Utc>, pause: &PauseState) {
        let checked_at = if pause.is_paused() {
            self.created_at + self.frozen_duration
        } else {
            now
        };
        self.checked_at = Some(checked_at);
        self.frozen_duration = checked_at - self.created_at;
        self.status = ItemStatus::Done;
    }

    /// Back to NotStarted. Timing is kept so a later start continues the count;
    /// the completed interval stays recoverable as `created_at + frozen_duration`.
    /// `checked_at` is dropped on purpose: only Done items carry one.
    fn reopen(&mut self) {
        self.status = ItemStatus::NotStarted;
        self.checked_at = None;
    }

    /// Discard all tracked time and start over from `now`
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.status = ItemStatus::NotStarted;
        self.created_at = now;
        self.frozen_duration = Duration::zero();
        self.checked_at = None;
    }

    /// Elapsed active time as it should be displayed at `now`
    pub fn elapsed(&self, now: DateTime<Utc>, pause: &PauseState) -> Duration {
        match self.status {
            ItemStatus::NotStarted | ItemStatus::Done => self.frozen_duration,
            ItemStatus::Started if pause.is_paused() => self.frozen_duration,
            ItemStatus::Started => now - self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::{Clock, MockClock};
    use pretty_assertions::assert_eq;

    fn new_item(clock: &MockClock) -> Item {
        let mut item = Item::new(7, "Draft release notes".to_string(), clock.now());
        item.id = 3;
        item
    }

    #[test]
    fn test_item_new() {
        let clock = MockClock::new();
        let item = Item::new(7, "Draft".to_string(), clock.now());
        assert_eq!(item.status, ItemStatus::NotStarted);
        assert_eq!(item.frozen_duration, Duration::zero());
        assert_eq!(item.checked_at, None);
        assert_eq!(item.created_at, clock.now());
    }

    #[test]
    fn test_toggle_cycle_preserves_identity_and_text() {
        let clock = MockClock::new();
        let pause = PauseState::running();
        let mut item = new_item(&clock);

        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.status, ItemStatus::Started);
        clock.advance_secs(90);
        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.status, ItemStatus::Done);
        clock.advance_secs(10);
        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.status, ItemStatus::NotStarted);

        assert_eq!(item.id, 3);
        assert_eq!(item.task_id, 7);
        assert_eq!(item.text, "Draft release notes");
    }

    #[test]
    fn test_start_anchors_at_now() {
        let clock = MockClock::new();
        let pause = PauseState::running();
        let mut item = new_item(&clock);

        clock.advance_secs(60);
        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.created_at, clock.now());
        assert_eq!(item.checked_at, None);

        clock.advance_secs(15);
        assert_eq!(item.elapsed(clock.now(), &pause), Duration::seconds(15));
    }

    #[test]
    fn test_done_freezes_exact_interval() {
        let clock = MockClock::new();
        let pause = PauseState::running();
        let mut item = new_item(&clock);

        item.toggle_status(clock.now(), &pause);
        clock.advance(Duration::milliseconds(12_345));
        item.toggle_status(clock.now(), &pause);

        let checked_at = item.checked_at.unwrap();
        assert_eq!(checked_at, clock.now());
        assert_eq!(item.frozen_duration, checked_at - item.created_at);
        assert_eq!(item.frozen_duration, Duration::milliseconds(12_345));

        clock.advance_secs(1000);
        assert_eq!(item.elapsed(clock.now(), &pause), Duration::milliseconds(12_345));
    }

    #[test]
    fn test_reopen_keeps_timing_and_restarting_continues_count() {
        let clock = MockClock::new();
        let pause = PauseState::running();
        let mut item = new_item(&clock);

        item.toggle_status(clock.now(), &pause);
        clock.advance_secs(30);
        item.toggle_status(clock.now(), &pause);
        let created_at = item.created_at;

        clock.advance_secs(600);
        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.status, ItemStatus::NotStarted);
        assert_eq!(item.created_at, created_at);
        assert_eq!(item.frozen_duration, Duration::seconds(30));
        assert_eq!(item.checked_at, None);
        assert_eq!(item.elapsed(clock.now(), &pause), Duration::seconds(30));

        // Starting again resumes from 30s rather than from zero
        clock.advance_secs(600);
        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.created_at, clock.now() - Duration::seconds(30));
        clock.advance_secs(20);
        assert_eq!(item.elapsed(clock.now(), &pause), Duration::seconds(50));

        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.frozen_duration, Duration::seconds(50));
        assert_eq!(item.frozen_duration, item.checked_at.unwrap() - item.created_at);
    }

    #[test]
    fn test_restart_from_every_status() {
        let clock = MockClock::new();
        let pause = PauseState::running();

        for toggles in 0..3 {
            let mut item = new_item(&clock);
            for _ in 0..toggles {
                item.toggle_status(clock.now(), &pause);
                clock.advance_secs(42);
            }

            item.restart(clock.now());
            assert_eq!(item.status, ItemStatus::NotStarted);
            assert_eq!(item.frozen_duration, Duration::zero());
            assert_eq!(item.checked_at, None);
            assert_eq!(item.created_at, clock.now());
            assert_eq!(item.text, "Draft release notes");
        }
    }

    #[test]
    fn test_restart_done_item_then_toggle() {
        let clock = MockClock::new();
        let pause = PauseState::running();
        let mut item = new_item(&clock);

        item.toggle_status(clock.now(), &pause);
        clock.advance_secs(42);
        item.toggle_status(clock.now(), &pause);
        assert_eq!(item.frozen_duration, Duration::seconds(42));

        clock.advance_secs(5);
        let now = clock.now();
        item.restart(now);
        assert_eq!(
            (item.created_at, item.frozen_duration, item.checked_at),
            (now, Duration::zero(), None)
        );

        item.toggle_status(now, &pause);
        assert_eq!(item.status, ItemStatus::Started);
        assert_eq!(item.created_at, now);
        assert_eq!(item.elapsed(now, &pause), Duration::zero());
    }

    #[test]
    fn test_elapsed_table() {
        let clock = MockClock::new();
        let running = PauseState::running();
        let mut item = new_item(&clock);
        item.frozen_duration = Duration::seconds(9);

        // NotStarted: frozen regardless of pause
        assert_eq!(item.elapsed(clock.now(), &running), Duration::seconds(9));

        item.status = ItemStatus::Started;
        item.created_at = clock.now() - Duration::seconds(100);
        assert_eq!(item.elapsed(clock.now(), &running), Duration::seconds(100));

        let paused = PauseState::paused_since(clock.now());
        assert_eq!(item.elapsed(clock.now(), &paused), Duration::seconds(9));

        item.status = ItemStatus::Done;
        assert_eq!(item.elapsed(clock.now(), &running), Duration::seconds(9));
        assert_eq!(item.elapsed(clock.now(), &paused), Duration::seconds(9));
    }

    #[test]
    fn test_start_while_paused_does_not_lose_time_on_resume() {
        let clock = MockClock::new();
        let mut pause = PauseState::running();
        let mut items = vec![new_item(&clock)];
        items[0].frozen_duration = Duration::seconds(12);

        pause.pause_all(&mut items, clock.now());
        clock.advance_secs(30);
        items[0].toggle_status(clock.now(), &pause);
        assert_eq!(items[0].status, ItemStatus::Started);
        assert_eq!(items[0].elapsed(clock.now(), &pause), Duration::seconds(12));

        clock.advance_secs(30);
        pause.resume_all(&mut items, clock.now());
        assert_eq!(items[0].elapsed(clock.now(), &pause), Duration::seconds(12));

        clock.advance_secs(8);
        assert_eq!(items[0].elapsed(clock.now(), &pause), Duration::seconds(20));
    }
}
