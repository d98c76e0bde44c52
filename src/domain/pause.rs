use super::enums::ItemStatus;
use super::item::Item;
use chrono::{DateTime, Utc};

/// Session-wide pause flag and the instant the pause began
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseState {
    paused_at: Option<DateTime<Utc>>,
}

impl PauseState {
    pub fn running() -> Self {
        Self { paused_at: None }
    }

    pub fn paused_since(paused_at: DateTime<Utc>) -> Self {
        Self {
            paused_at: Some(paused_at),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn paused_at(&self) -> Option<DateTime<Utc>> {
        self.paused_at
    }

    /// Freeze every started item at its elapsed-so-far.
    /// Returns the indices of the items that changed, or `None` if already paused.
    pub fn pause_all(&mut self, items: &mut [Item], now: DateTime<Utc>) -> Option<Vec<usize>> {
        if self.is_paused() {
            return None;
        }

        let mut touched = Vec::new();
        for (idx, item) in items.iter_mut().enumerate() {
            if item.status == ItemStatus::Started {
                item.frozen_duration = now - item.created_at;
                touched.push(idx);
            }
        }

        self.paused_at = Some(now);
        Some(touched)
    }

    /// Shift the anchor of every started item forward by the paused interval.
    /// Returns the indices of the items that changed, or `None` if not paused.
    pub fn resume_all(&mut self, items: &mut [Item], now: DateTime<Utc>) -> Option<Vec<usize>> {
        let paused_at = self.paused_at.take()?;
        let shift = now - paused_at;

        let mut touched = Vec::new();
        for (idx, item) in items.iter_mut().enumerate() {
            if item.status == ItemStatus::Started {
                item.created_at += shift;
                touched.push(idx);
            }
        }

        Some(touched)
    }
}
