//! Click-driven selection with group dragging
//!
//! Engine-independent: the coordinator talks to the scene graph, ray caster
//! and drag subsystem only through [`SelectionBackend`].

pub mod coordinator;
pub mod input;

pub use coordinator::{
    ClickOutcome, Container, DraggableSet, Highlight, SelectionBackend, SelectionCoordinator,
};
pub use input::{intersect_plane, ray_from_ndc, screen_to_ndc, KeyTransition, ModifierKey};
