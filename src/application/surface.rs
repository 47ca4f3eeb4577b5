// Port for the non-map UI: workout form, sidebar list and alerts
use crate::domain::summary::WorkoutSummary;
use crate::domain::workout::WorkoutKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Distance,
}

pub trait Surface: Send {
    /// Reveal the form and move focus to `focus`
    fn show_form(&mut self, focus: FormField);

    /// Hide the form and clear every input
    fn hide_form(&mut self);

    /// Show cadence for running or elevation for cycling, hiding the other
    fn show_metric_field(&mut self, kind: WorkoutKind);

    /// Insert a row at the top of the sidebar
    fn prepend_row(&mut self, row: &WorkoutSummary);

    fn remove_row(&mut self, workout_id: &str);

    fn clear_rows(&mut self);

    /// Blocking notification
    fn alert(&mut self, message: &str);

    /// Restart the session from a blank page
    fn reload(&mut self);
}
