// Application layer - Panel store, form sessions and the dashboard use cases
pub mod dashboard_service;
pub mod id_allocator;
pub mod panel_form;
pub mod panel_slot;
pub mod panel_store;
pub mod storage;
