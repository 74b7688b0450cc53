//! Feature modules, one per entity.
//!
//! Each module follows the same structure: `model.rs` (entities and DTOs),
//! `service.rs` (business logic and queries), `controller.rs` (HTTP
//! handlers), `router.rs` (route wiring).

pub mod courses;
pub mod exams;
pub mod teachers;
