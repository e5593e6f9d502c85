use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::errors::ScheduleError;
use crate::models::slot::{default_workday_slots, AvailabilitySlot, DailyAvailability};
use crate::provider::AvailabilityProvider;

/// Edit session over a doctor's half-hour availability grid.
///
/// Loading a date is synchronous against the schedule the editor was built
/// with; only `save` goes to the provider. Switching dates mid-edit drops
/// unsaved toggles without asking, which is the portal's documented
/// behavior.
pub struct AvailabilityEditor {
    provider: Arc<dyn AvailabilityProvider>,
    schedule: Vec<DailyAvailability>,
    selected_date: Option<NaiveDate>,
    grid: Vec<AvailabilitySlot>,
    baseline: Vec<AvailabilitySlot>,
    editing: bool,
}

impl AvailabilityEditor {
    pub fn new(provider: Arc<dyn AvailabilityProvider>) -> Self {
        Self::with_schedule(provider, Vec::new())
    }

    /// Build an editor over a doctor's known per-date grids.
    pub fn with_schedule(
        provider: Arc<dyn AvailabilityProvider>,
        schedule: Vec<DailyAvailability>,
    ) -> Self {
        Self {
            provider,
            schedule,
            selected_date: None,
            grid: Vec::new(),
            baseline: Vec::new(),
            editing: false,
        }
    }

    /// Load the grid for a date: the stored entry if one exists for that
    /// calendar day, otherwise the default all-unavailable workday grid.
    /// Always leaves edit mode, discarding any unsaved toggles.
    pub fn select_date(&mut self, date: NaiveDate) {
        if date < Local::now().date_naive() {
            warn!("Ignoring selection of past date {}", date);
            return;
        }

        let grid = self
            .schedule
            .iter()
            .find(|day| day.date == date)
            .map(|day| day.slots.clone())
            .unwrap_or_else(default_workday_slots);

        debug!("Loaded {} grid entries for {}", grid.len(), date);
        self.selected_date = Some(date);
        self.baseline = grid.clone();
        self.grid = grid;
        self.editing = false;
    }

    /// Enter edit mode. The grid as it stands becomes the revert target for
    /// `cancel_edit`. No-op until a date is selected.
    pub fn begin_edit(&mut self) {
        if self.selected_date.is_none() {
            debug!("Cannot edit before a date is selected");
            return;
        }
        self.baseline = self.grid.clone();
        self.editing = true;
    }

    /// Flip one grid entry between available and unavailable. Returns false
    /// outside edit mode or when the index is out of range.
    pub fn toggle_slot(&mut self, index: usize) -> bool {
        if !self.editing {
            debug!("Ignoring toggle outside edit mode");
            return false;
        }
        match self.grid.get_mut(index) {
            Some(slot) => {
                slot.available = !slot.available;
                true
            }
            None => {
                warn!("Toggle index {} out of range", index);
                false
            }
        }
    }

    /// Drop in-progress toggles, restoring the grid captured when the edit
    /// session began, and leave edit mode.
    pub fn cancel_edit(&mut self) {
        if self.editing {
            debug!("Cancelling edit, reverting unsaved toggles");
            self.grid = self.baseline.clone();
            self.editing = false;
        }
    }

    /// Persist the edited grid. Success ends the edit session; failure
    /// keeps it open with the edits intact so the doctor can retry.
    pub async fn save(&mut self) -> Result<(), ScheduleError> {
        if !self.editing {
            debug!("Ignoring save outside edit mode");
            return Ok(());
        }
        let date = match self.selected_date {
            Some(date) => date,
            None => return Ok(()),
        };

        info!("Saving availability for {} ({} entries)", date, self.grid.len());
        match self.provider.save_availability(date, &self.grid).await {
            Ok(()) => {
                self.editing = false;
                Ok(())
            }
            Err(err) => {
                error!("Failed to save availability for {}: {}", date, err);
                Err(err)
            }
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.grid
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }
}
