// Application layer - Controller, persistence adapter and ports
pub mod controller;
pub mod events;
pub mod key_value_store;
pub mod map_view;
pub mod surface;
pub mod workout_storage;
