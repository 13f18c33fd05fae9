// Domain layer - Panel entities, icon registry and the default collection
pub mod defaults;
pub mod icon;
pub mod panel;
