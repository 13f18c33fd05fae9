// Coal industry dashboard - panel collection state, persistence and HTTP surface
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
