pub mod group;
pub mod patient;
pub mod update;
