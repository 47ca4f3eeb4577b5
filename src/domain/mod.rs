// Domain layer - Workout model and pure rules
pub mod coordinates;
pub mod form;
pub mod identity;
pub mod summary;
pub mod workout;
