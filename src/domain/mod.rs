//! Domain layer: aggregates, value objects, domain events.

pub mod aggregates;
pub mod events;
pub mod value_objects;
