pub mod diagnostic;
pub mod options;
pub mod plugin;
pub mod property_registry;
pub mod registry;
pub mod theme;
pub mod types;
pub mod usage;
