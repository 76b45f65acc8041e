//! Roster display state with a guard against stale fetches.
//!
//! Selecting a date issues a [`FetchTicket`]. Only the most recently issued
//! ticket may replace the displayed rows, so a slow fetch for an earlier
//! selection can never overwrite the roster of a later one. A failed fetch
//! keeps the rows that were already displayed.

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, warn};
use shared::ReportRow;
use std::sync::Mutex;

use super::roster_service::RosterService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    date: NaiveDate,
}

impl FetchTicket {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterView {
    selected_date: Option<NaiveDate>,
    /// Day the displayed rows belong to
    shown_date: Option<NaiveDate>,
    rows: Vec<ReportRow>,
    issued: u64,
    loading: bool,
    last_error: Option<String>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a day and get the ticket its fetch must complete with
    pub fn select_date(&self, date: NaiveDate) -> (RosterView, FetchTicket) {
        let ticket = FetchTicket {
            generation: self.issued + 1,
            date,
        };
        let view = RosterView {
            selected_date: Some(date),
            issued: ticket.generation,
            loading: true,
            ..self.clone()
        };
        (view, ticket)
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.issued
    }

    /// Apply a finished fetch. Stale tickets leave the view unchanged.
    pub fn complete(&self, ticket: FetchTicket, result: Result<Vec<ReportRow>>) -> RosterView {
        if !self.is_current(&ticket) {
            debug!(
                "Discarding stale roster for {} (ticket {}, latest {})",
                ticket.date, ticket.generation, self.issued
            );
            return self.clone();
        }

        match result {
            Ok(rows) => RosterView {
                shown_date: Some(ticket.date),
                rows,
                loading: false,
                last_error: None,
                ..self.clone()
            },
            Err(e) => {
                warn!("Roster fetch for {} failed, keeping previous rows: {:#}", ticket.date, e);
                RosterView {
                    loading: false,
                    last_error: Some(format!("{:#}", e)),
                    ..self.clone()
                }
            }
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn shown_date(&self) -> Option<NaiveDate> {
        self.shown_date
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Shared holder that drives a [`RosterView`] through the roster service
pub struct RosterViewHandle {
    view: Mutex<RosterView>,
    roster_service: RosterService,
}

impl RosterViewHandle {
    pub fn new(roster_service: RosterService) -> Self {
        Self {
            view: Mutex::new(RosterView::new()),
            roster_service,
        }
    }

    pub fn snapshot(&self) -> RosterView {
        self.lock().clone()
    }

    /// Select a day, fetch its roster and apply it if still current
    pub async fn show_date(&self, date: NaiveDate) -> RosterView {
        let ticket = {
            let mut view = self.lock();
            let (next, ticket) = view.select_date(date);
            *view = next;
            ticket
        };

        let result = self.roster_service.roster_for_date(date).await;

        let mut view = self.lock();
        let next = view.complete(ticket, result);
        *view = next.clone();
        next
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RosterView> {
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::DayInterval;
    use crate::backend::storage::yaml::test_utils::TestEnvironment;
    use crate::backend::storage::AttendanceStorage;
    use async_trait::async_trait;
    use shared::{AttendanceEntry, AttendanceRecord};
    use std::sync::Arc;
    use std::time::Duration;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn row(name: &str, day: u32) -> ReportRow {
        ReportRow::pending(name, Vec::new(), date(day).and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn test_latest_selection_wins_over_slower_earlier_fetch() {
        let view = RosterView::new();
        let (view, first) = view.select_date(date(12));
        let (view, second) = view.select_date(date(13));

        let view = view.complete(second, Ok(vec![row("Bob", 13)]));
        let view = view.complete(first, Ok(vec![row("Alice", 12)]));

        assert_eq!(view.shown_date(), Some(date(13)));
        assert_eq!(view.rows()[0].child_name, "Bob");
        assert!(!view.is_loading());
    }

    #[test]
    fn test_failed_fetch_keeps_previous_rows() {
        let (view, ticket) = RosterView::new().select_date(date(12));
        let view = view.complete(ticket, Ok(vec![row("Alice", 12)]));

        let (view, ticket) = view.select_date(date(13));
        let view = view.complete(ticket, Err(anyhow::anyhow!("network down")));

        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.shown_date(), Some(date(12)));
        assert_eq!(view.selected_date(), Some(date(13)));
        assert!(view.last_error().unwrap().contains("network down"));

        // Re-selecting the date is the way to retry.
        let (view, ticket) = view.select_date(date(13));
        let view = view.complete(ticket, Ok(vec![row("Bob", 13)]));
        assert!(view.last_error().is_none());
        assert_eq!(view.shown_date(), Some(date(13)));
    }

    #[test]
    fn test_select_date_does_not_touch_original() {
        let original = RosterView::new();
        let (next, ticket) = original.select_date(date(12));

        assert!(original.selected_date().is_none());
        assert!(next.is_current(&ticket));
        assert!(!original.is_current(&ticket));
    }

    /// Attendance store that answers slower for the 12th than the 13th
    struct SlowForEarlierDay;

    #[async_trait]
    impl AttendanceStorage for SlowForEarlierDay {
        async fn list_attendance_in(&self, interval: &DayInterval) -> Result<Vec<AttendanceRecord>> {
            if interval.date() == date(12) {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            let mut attendance = std::collections::BTreeMap::new();
            let name = if interval.date() == date(12) { "Alice" } else { "Bob" };
            attendance.insert(name.to_string(), AttendanceEntry::present());
            Ok(vec![AttendanceRecord {
                id: format!("att_{}", interval.date()),
                date: interval.start,
                attendance,
            }])
        }

        async fn store_attendance(&self, _record: &AttendanceRecord) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_handle_ignores_stale_response() {
        let env = TestEnvironment::new().await.unwrap();
        let service = RosterService::new(
            Arc::new(SlowForEarlierDay),
            Arc::new(env.daily_report_repository()),
            Arc::new(env.child_repository()),
        );
        let handle = RosterViewHandle::new(service);

        tokio::join!(handle.show_date(date(12)), handle.show_date(date(13)));

        let view = handle.snapshot();
        assert_eq!(view.shown_date(), Some(date(13)));
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].child_name, "Bob");
    }
}
