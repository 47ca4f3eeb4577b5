// Workout controller - Keeps the map, the sidebar and storage in sync with one list
use crate::application::events::AppEvent;
use crate::application::key_value_store::StorageError;
use crate::application::map_view::{MapBackend, MapHandle, Marker};
use crate::application::surface::{FormField, Surface};
use crate::application::workout_storage::WorkoutStorage;
use crate::domain::coordinates::Coordinates;
use crate::domain::form::{FormInput, INVALID_INPUT_MESSAGE};
use crate::domain::identity::{Clock, IdGenerator, SystemClock, TimestampIds};
use crate::domain::summary::WorkoutSummary;
use crate::domain::workout::{Workout, WorkoutBase, WorkoutKind};
use crate::infrastructure::config::MapConfig;
use chrono::{FixedOffset, Offset, Utc};

pub const GEOLOCATION_FAILED_MESSAGE: &str = "Could not get your location!";

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("map is not initialized")]
    MapUnavailable,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Idle,
    AwaitingSubmission { pending: Coordinates },
}

/// Process-wide state owned by the controller
#[derive(Debug)]
pub struct SessionState {
    /// Creation order; the sidebar shows it reversed
    workouts: Vec<Workout>,
    form: FormState,
    map: Option<MapHandle>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            workouts: Vec::new(),
            form: FormState::Idle,
            map: None,
        }
    }
}

pub struct Controller<M, S> {
    state: SessionState,
    map: M,
    surface: S,
    storage: WorkoutStorage,
    settings: MapConfig,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    offset: FixedOffset,
}

impl<M: MapBackend, S: Surface> Controller<M, S> {
    pub fn new(map: M, surface: S, storage: WorkoutStorage, settings: MapConfig) -> Self {
        Self {
            state: SessionState::default(),
            map,
            surface,
            storage,
            settings,
            ids: Box::new(TimestampIds),
            clock: Box::new(SystemClock),
            offset: Utc.fix(),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Describe workouts by the calendar day at `offset` instead of UTC
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Replace the in-memory list with what storage holds.
    ///
    /// Unreadable data leaves the list empty and is copied aside first.
    pub fn hydrate(&mut self) {
        self.state.workouts = match self.load_workouts() {
            Ok(workouts) => {
                tracing::info!("Loaded {} saved workouts", workouts.len());
                workouts
            }
            Err(HydrationError::Storage(e @ StorageError::Document(_))) => {
                // The store moves an unreadable document aside on its next write
                tracing::error!("Storage document is unreadable, starting empty: {}", e);
                Vec::new()
            }
            Err(HydrationError::Storage(e @ StorageError::Corrupt(_))) => {
                tracing::error!("Saved workouts are corrupt: {}", e);
                self.quarantine();
                Vec::new()
            }
            Err(HydrationError::Storage(e)) => {
                tracing::error!("Could not read saved workouts: {}", e);
                Vec::new()
            }
            Err(HydrationError::Record(e)) => {
                tracing::error!("Saved workout could not be rebuilt: {}", e);
                self.quarantine();
                Vec::new()
            }
        };
    }

    fn load_workouts(&self) -> Result<Vec<Workout>, HydrationError> {
        self.storage
            .load()
            .map_err(HydrationError::Storage)?
            .into_iter()
            .map(|record| {
                Workout::from_compact(record)
                    .map(|workout| workout.localized(&self.offset))
                    .map_err(HydrationError::Record)
            })
            .collect()
    }

    fn quarantine(&self) {
        if let Err(e) = self.storage.quarantine() {
            tracing::error!("Could not back up unreadable workouts: {}", e);
        }
    }

    pub fn dispatch(&mut self, event: AppEvent) -> Result<(), ControllerError> {
        tracing::debug!("Handling {} event", event.name());

        match event {
            AppEvent::Started => self.on_started(),
            AppEvent::PositionResolved { coords } => self.on_position_resolved(coords),
            AppEvent::PositionUnavailable { reason } => self.on_position_unavailable(&reason),
            AppEvent::MapClicked { coords } => self.on_map_clicked(coords),
            AppEvent::TypeChanged { workout_type } => self.on_type_changed(workout_type),
            AppEvent::FormSubmitted { form } => self.on_form_submitted(&form),
            AppEvent::FormCancelled => self.on_form_cancelled(),
            AppEvent::WorkoutSelected { id } => self.on_workout_selected(&id),
            AppEvent::WorkoutDeleted { id } => self.on_workout_deleted(&id),
            AppEvent::Reset => self.on_reset(),
        }
    }

    fn on_started(&mut self) -> Result<(), ControllerError> {
        self.state.form = FormState::Idle;
        self.surface.hide_form();
        self.surface.clear_rows();
        for workout in &self.state.workouts {
            self.surface.prepend_row(&WorkoutSummary::from_workout(workout));
        }
        Ok(())
    }

    fn on_position_resolved(&mut self, center: Coordinates) -> Result<(), ControllerError> {
        let handle = self.map.initialize(center, self.settings.zoom);
        self.map.add_tile_layer(handle, &self.settings.tile_layer());
        self.map.on_click(handle, AppEvent::map_clicked);

        for workout in &self.state.workouts {
            self.map.add_marker(handle, &Marker::for_workout(workout));
        }

        self.state.map = Some(handle);
        tracing::info!(
            "Map centered on {:.4}, {:.4} with {} markers",
            center.lat,
            center.lng,
            self.state.workouts.len()
        );
        Ok(())
    }

    fn on_position_unavailable(&mut self, reason: &str) -> Result<(), ControllerError> {
        tracing::warn!("Geolocation unavailable: {}", reason);
        self.state.map = None;
        self.surface.alert(GEOLOCATION_FAILED_MESSAGE);
        Ok(())
    }

    fn on_map_clicked(&mut self, coords: Coordinates) -> Result<(), ControllerError> {
        if self.state.map.is_none() {
            return Err(ControllerError::MapUnavailable);
        }

        if let FormState::AwaitingSubmission { pending } = self.state.form {
            tracing::debug!(
                "Replacing pending location {:.4}, {:.4}",
                pending.lat,
                pending.lng
            );
        }

        self.state.form = FormState::AwaitingSubmission { pending: coords };
        self.surface.show_form(FormField::Distance);
        Ok(())
    }

    fn on_type_changed(&mut self, kind: WorkoutKind) -> Result<(), ControllerError> {
        self.surface.show_metric_field(kind);
        Ok(())
    }

    fn on_form_submitted(&mut self, form: &FormInput) -> Result<(), ControllerError> {
        let FormState::AwaitingSubmission { pending } = self.state.form else {
            tracing::warn!("Ignoring form submission without a pending map location");
            return Ok(());
        };

        let workout = match self.build_workout(form, pending) {
            Ok(workout) => workout,
            Err(reason) => {
                tracing::debug!("Rejected form input: {}", reason);
                self.surface.alert(INVALID_INPUT_MESSAGE);
                return Ok(());
            }
        };

        // Nothing changes until the extended list is saved
        let mut candidate = self.state.workouts.clone();
        candidate.push(workout.clone());
        self.persist(&candidate)?;
        self.state.workouts = candidate;

        tracing::info!("Created workout {} ({})", workout.id(), workout.description());

        if let Some(handle) = self.state.map {
            self.map.add_marker(handle, &Marker::for_workout(&workout));
        }
        self.surface.prepend_row(&WorkoutSummary::from_workout(&workout));
        self.surface.hide_form();
        self.state.form = FormState::Idle;
        Ok(())
    }

    fn build_workout(&mut self, form: &FormInput, pending: Coordinates) -> Result<Workout, String> {
        let input = form.validate().map_err(|e| e.to_string())?;
        let date = self.clock.now();
        let base = WorkoutBase {
            coords: pending,
            distance_km: input.distance_km,
            duration_min: input.duration_min,
            date,
            id: self.ids.next_id(date),
        };

        let workout = match input.kind {
            WorkoutKind::Running => Workout::running(base, input.metric),
            WorkoutKind::Cycling => Workout::cycling(base, input.metric),
        };
        workout
            .map(|workout| workout.localized(&self.offset))
            .map_err(|e| e.to_string())
    }

    fn on_form_cancelled(&mut self) -> Result<(), ControllerError> {
        if self.state.form != FormState::Idle {
            self.state.form = FormState::Idle;
            self.surface.hide_form();
        }
        Ok(())
    }

    fn on_workout_selected(&mut self, id: &str) -> Result<(), ControllerError> {
        let Some(workout) = self.find(id) else {
            tracing::debug!("No workout with id {}", id);
            return Ok(());
        };
        let coords = workout.coords();

        if let Some(handle) = self.state.map {
            self.map.pan_to(handle, coords, self.settings.zoom);
        }
        Ok(())
    }

    fn on_workout_deleted(&mut self, id: &str) -> Result<(), ControllerError> {
        let Some(index) = self.state.workouts.iter().position(|w| w.id() == id) else {
            tracing::debug!("No workout with id {} to delete", id);
            return Ok(());
        };

        let mut candidate = self.state.workouts.clone();
        let removed = candidate.remove(index);
        self.persist(&candidate)?;
        self.state.workouts = candidate;

        if let Some(handle) = self.state.map {
            self.map.remove_marker(handle, removed.id());
        }
        self.surface.remove_row(removed.id());
        tracing::info!("Deleted workout {} ({})", removed.id(), removed.description());
        Ok(())
    }

    fn on_reset(&mut self) -> Result<(), ControllerError> {
        self.storage.clear().map_err(|e| {
            tracing::error!("Could not clear saved workouts: {}", e);
            ControllerError::Storage(e)
        })?;
        self.state = SessionState::default();
        self.surface.reload();
        tracing::info!("Cleared saved workouts");
        Ok(())
    }

    fn persist(&self, workouts: &[Workout]) -> Result<(), ControllerError> {
        self.storage.save(workouts).map_err(|e| {
            tracing::error!("Could not save workouts: {}", e);
            ControllerError::Storage(e)
        })
    }

    fn find(&self, id: &str) -> Option<&Workout> {
        self.state.workouts.iter().find(|w| w.id() == id)
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.state.workouts
    }

    /// Sidebar rows, newest first
    pub fn summaries(&self) -> Vec<WorkoutSummary> {
        self.state
            .workouts
            .iter()
            .rev()
            .map(WorkoutSummary::from_workout)
            .collect()
    }

    pub fn form_state(&self) -> FormState {
        self.state.form
    }

    pub fn map_handle(&self) -> Option<MapHandle> {
        self.state.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

enum HydrationError {
    Storage(StorageError),
    Record(crate::domain::workout::WorkoutError),
}
