//! Selection and group-drag coordination
//!
//! The coordinator owns the object pool, the set of selected ids and the
//! drag target list. Selected objects are clustered under a single group
//! container so they can be dragged together; when nothing is selected every
//! pool object is dragged on its own.
//!
//! The selected set is the source of truth. Reparenting and highlight are
//! pushed out to a [`SelectionBackend`] as side effects of membership
//! changes, so the backend never has to be queried to learn who is selected.

use super::input::{KeyTransition, ModifierKey};
use bevy::log::debug;
use bevy::math::Vec2;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Parent container a pool object can live under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container<Id> {
    Root,
    Group(Id),
}

/// Cosmetic highlight state, tied 1:1 to selection membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Selected,
}

/// Targets handed to the drag subsystem.
///
/// Either every pool object is dragged on its own, or the selection group is
/// the only target and carries its children along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraggableSet<Id> {
    Individual(Vec<Id>),
    Grouped(Id),
}

impl<Id> DraggableSet<Id> {
    pub fn targets(&self) -> &[Id] {
        match self {
            DraggableSet::Individual(pool) => pool,
            DraggableSet::Grouped(group) => std::slice::from_ref(group),
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, DraggableSet::Grouped(_))
    }
}

/// What a click ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome<Id> {
    /// Modifier not held, selection untouched
    Ignored,
    /// Modifier held but the ray hit nothing in the pool
    Missed,
    Selected(Id),
    Deselected(Id),
}

/// Engine operations the coordinator drives
pub trait SelectionBackend<Id> {
    /// Nearest object among `candidates` under the given NDC position.
    /// Candidates parented under the selection group are included.
    fn ray_cast(&mut self, ndc: Vec2, candidates: &[Id]) -> Option<Id>;

    /// Move `object` under `container`, keeping its world transform
    fn attach(&mut self, object: Id, container: Container<Id>);

    fn set_highlight(&mut self, object: Id, highlight: Highlight);

    /// Replace the drag subsystem's targets and group flag in one step
    fn set_drag_targets(&mut self, draggable: &DraggableSet<Id>);

    fn request_render(&mut self);
}

/// Selection state machine for the snap scene
#[derive(Debug, Clone)]
pub struct SelectionCoordinator<Id> {
    pool: Vec<Id>,
    group: Id,
    selected: HashSet<Id>,
    modifier_key: ModifierKey,
    modifier_held: bool,
    draggable: DraggableSet<Id>,
}

impl<Id> SelectionCoordinator<Id>
where
    Id: Copy + Eq + Hash + Debug,
{
    /// Start with nothing selected and every pool object draggable
    pub fn new(pool: Vec<Id>, group: Id, modifier_key: ModifierKey) -> Self {
        let draggable = DraggableSet::Individual(pool.clone());
        Self {
            pool,
            group,
            selected: HashSet::new(),
            modifier_key,
            modifier_held: false,
            draggable,
        }
    }

    pub fn pool(&self) -> &[Id] {
        &self.pool
    }

    pub fn group(&self) -> Id {
        self.group
    }

    pub fn draggable(&self) -> &DraggableSet<Id> {
        &self.draggable
    }

    pub fn modifier_key(&self) -> ModifierKey {
        self.modifier_key
    }

    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    pub fn is_selected(&self, id: Id) -> bool {
        self.selected.contains(&id)
    }

    /// Selected objects in pool order
    pub fn selected(&self) -> Vec<Id> {
        self.pool
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    /// Track the modifier key.
    ///
    /// Pressing the modifier enables selection, pressing anything else
    /// disables it, and releasing any key disables it.
    pub fn handle_key(&mut self, transition: KeyTransition) -> bool {
        self.modifier_held = match transition {
            KeyTransition::Pressed(key) => self.modifier_key.matches(key),
            KeyTransition::Released(_) => false,
        };
        self.modifier_held
    }

    /// Interpret a left click at `ndc`.
    ///
    /// Always ends with a render request. Without the modifier held nothing
    /// else happens.
    pub fn handle_click<B>(&mut self, ndc: Vec2, backend: &mut B) -> ClickOutcome<Id>
    where
        B: SelectionBackend<Id>,
    {
        if !self.modifier_held {
            backend.request_render();
            return ClickOutcome::Ignored;
        }

        let outcome = match backend.ray_cast(ndc, &self.pool) {
            Some(hit) if self.pool.contains(&hit) => self.toggle_membership(hit, backend),
            Some(stray) => {
                debug!("Ignoring ray hit on {:?}, not part of the object pool", stray);
                ClickOutcome::Missed
            }
            None => ClickOutcome::Missed,
        };

        self.refresh_draggable(backend);
        backend.request_render();
        outcome
    }

    /// Flip one object's membership directly, bypassing ray casting
    pub fn toggle<B>(&mut self, id: Id, backend: &mut B) -> ClickOutcome<Id>
    where
        B: SelectionBackend<Id>,
    {
        if !self.pool.contains(&id) {
            return ClickOutcome::Missed;
        }
        let outcome = self.toggle_membership(id, backend);
        self.refresh_draggable(backend);
        backend.request_render();
        outcome
    }

    /// Deselect everything. Returns how many objects were released.
    pub fn clear_selection<B>(&mut self, backend: &mut B) -> usize
    where
        B: SelectionBackend<Id>,
    {
        let released = self.selected();
        for &id in &released {
            self.toggle_membership(id, backend);
        }
        self.refresh_draggable(backend);
        backend.request_render();
        released.len()
    }

    fn toggle_membership<B>(&mut self, id: Id, backend: &mut B) -> ClickOutcome<Id>
    where
        B: SelectionBackend<Id>,
    {
        if self.selected.remove(&id) {
            backend.attach(id, Container::Root);
            backend.set_highlight(id, Highlight::None);
            ClickOutcome::Deselected(id)
        } else {
            self.selected.insert(id);
            backend.attach(id, Container::Group(self.group));
            backend.set_highlight(id, Highlight::Selected);
            ClickOutcome::Selected(id)
        }
    }

    fn refresh_draggable<B>(&mut self, backend: &mut B)
    where
        B: SelectionBackend<Id>,
    {
        self.draggable = if self.selected.is_empty() {
            DraggableSet::Individual(self.pool.clone())
        } else {
            DraggableSet::Grouped(self.group)
        };
        backend.set_drag_targets(&self.draggable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::KeyCode;
    use std::collections::HashMap;

    const GROUP: u32 = 100;

    /// In-memory scene graph that records everything the coordinator does
    #[derive(Default)]
    struct RecordingScene {
        next_hit: Option<u32>,
        parents: HashMap<u32, Container<u32>>,
        highlights: HashMap<u32, Highlight>,
        drag_targets: Option<DraggableSet<u32>>,
        last_candidates: Vec<u32>,
        ray_casts: usize,
        renders: usize,
    }

    impl RecordingScene {
        fn with_pool(pool: &[u32]) -> Self {
            let mut scene = Self::default();
            for &id in pool {
                scene.parents.insert(id, Container::Root);
                scene.highlights.insert(id, Highlight::None);
            }
            scene
        }

        fn group_children(&self) -> Vec<u32> {
            let mut children: Vec<u32> = self
                .parents
                .iter()
                .filter(|(_, parent)| **parent == Container::Group(GROUP))
                .map(|(id, _)| *id)
                .collect();
            children.sort_unstable();
            children
        }
    }

    impl SelectionBackend<u32> for RecordingScene {
        fn ray_cast(&mut self, _ndc: Vec2, candidates: &[u32]) -> Option<u32> {
            self.ray_casts += 1;
            self.last_candidates = candidates.to_vec();
            self.next_hit
        }

        fn attach(&mut self, object: u32, container: Container<u32>) {
            self.parents.insert(object, container);
        }

        fn set_highlight(&mut self, object: u32, highlight: Highlight) {
            self.highlights.insert(object, highlight);
        }

        fn set_drag_targets(&mut self, draggable: &DraggableSet<u32>) {
            self.drag_targets = Some(draggable.clone());
        }

        fn request_render(&mut self) {
            self.renders += 1;
        }
    }

    fn pool() -> Vec<u32> {
        (0..10).collect()
    }

    fn setup() -> (SelectionCoordinator<u32>, RecordingScene) {
        let coordinator = SelectionCoordinator::new(pool(), GROUP, ModifierKey::Shift);
        let scene = RecordingScene::with_pool(&pool());
        (coordinator, scene)
    }

    fn click(
        coordinator: &mut SelectionCoordinator<u32>,
        scene: &mut RecordingScene,
        hit: Option<u32>,
    ) -> ClickOutcome<u32> {
        scene.next_hit = hit;
        coordinator.handle_click(Vec2::ZERO, scene)
    }

    fn assert_consistent(coordinator: &SelectionCoordinator<u32>, scene: &RecordingScene) {
        for id in pool() {
            let selected = coordinator.is_selected(id);
            let expected_parent = if selected {
                Container::Group(GROUP)
            } else {
                Container::Root
            };
            let expected_highlight = if selected {
                Highlight::Selected
            } else {
                Highlight::None
            };
            assert_eq!(scene.parents[&id], expected_parent, "parent of {id}");
            assert_eq!(scene.highlights[&id], expected_highlight, "highlight of {id}");
        }

        match coordinator.draggable() {
            DraggableSet::Individual(targets) => {
                assert_eq!(coordinator.selection_len(), 0);
                assert_eq!(targets, &pool());
            }
            DraggableSet::Grouped(group) => {
                assert!(coordinator.selection_len() > 0);
                assert_eq!(*group, GROUP);
            }
        }
    }

    #[test]
    fn test_starts_ungrouped() {
        let (coordinator, _) = setup();
        assert!(!coordinator.modifier_held());
        assert_eq!(coordinator.draggable(), &DraggableSet::Individual(pool()));
        assert!(coordinator.selected().is_empty());
    }

    #[test]
    fn test_modifier_key_is_asymmetric() {
        let (mut coordinator, _) = setup();

        assert!(coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft)));
        // Any other key going down leaves selection mode
        assert!(!coordinator.handle_key(KeyTransition::Pressed(KeyCode::KeyA)));

        assert!(coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftRight)));
        // Releasing an unrelated key also leaves selection mode
        assert!(!coordinator.handle_key(KeyTransition::Released(KeyCode::KeyA)));
        assert!(!coordinator.modifier_held());
    }

    #[test]
    fn test_configured_modifier() {
        let mut coordinator = SelectionCoordinator::new(pool(), GROUP, ModifierKey::Control);
        assert!(!coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft)));
        assert!(coordinator.handle_key(KeyTransition::Pressed(KeyCode::ControlLeft)));
    }

    #[test]
    fn test_empty_click_resets_to_full_pool() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        let outcome = click(&mut coordinator, &mut scene, None);

        assert_eq!(outcome, ClickOutcome::Missed);
        assert_eq!(scene.drag_targets, Some(DraggableSet::Individual(pool())));
        assert!(scene.group_children().is_empty());
        assert_eq!(scene.renders, 1);
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_single_select() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        let outcome = click(&mut coordinator, &mut scene, Some(3));

        assert_eq!(outcome, ClickOutcome::Selected(3));
        assert_eq!(scene.group_children(), vec![3]);
        assert_eq!(scene.highlights[&3], Highlight::Selected);
        assert_eq!(scene.drag_targets, Some(DraggableSet::Grouped(GROUP)));
        assert!(coordinator.draggable().is_grouped());
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_select_then_deselect() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        click(&mut coordinator, &mut scene, Some(3));
        let outcome = click(&mut coordinator, &mut scene, Some(3));

        assert_eq!(outcome, ClickOutcome::Deselected(3));
        assert_eq!(scene.parents[&3], Container::Root);
        assert_eq!(scene.highlights[&3], Highlight::None);
        assert!(scene.group_children().is_empty());
        assert_eq!(scene.drag_targets, Some(DraggableSet::Individual(pool())));
        assert!(!coordinator.draggable().is_grouped());
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_click_without_modifier_only_renders() {
        let (mut coordinator, mut scene) = setup();

        let outcome = click(&mut coordinator, &mut scene, Some(3));

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(scene.ray_casts, 0);
        assert_eq!(scene.drag_targets, None);
        assert_eq!(scene.parents[&3], Container::Root);
        assert_eq!(scene.renders, 1);
    }

    #[test]
    fn test_multi_select_keeps_group_shape() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        click(&mut coordinator, &mut scene, Some(1));
        assert_eq!(scene.drag_targets, Some(DraggableSet::Grouped(GROUP)));
        click(&mut coordinator, &mut scene, Some(5));
        assert_eq!(scene.drag_targets, Some(DraggableSet::Grouped(GROUP)));

        assert_eq!(scene.group_children(), vec![1, 5]);
        assert_eq!(coordinator.selected(), vec![1, 5]);
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_ray_cast_covers_whole_pool_including_grouped() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        click(&mut coordinator, &mut scene, Some(2));
        click(&mut coordinator, &mut scene, None);

        assert_eq!(scene.last_candidates, pool());
    }

    #[test]
    fn test_empty_click_keeps_grouped_membership() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        click(&mut coordinator, &mut scene, Some(4));
        scene.drag_targets = None;
        click(&mut coordinator, &mut scene, None);

        assert_eq!(coordinator.selected(), vec![4]);
        assert_eq!(scene.drag_targets, Some(DraggableSet::Grouped(GROUP)));
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_stray_hit_is_treated_as_miss() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        let outcome = click(&mut coordinator, &mut scene, Some(GROUP));

        assert_eq!(outcome, ClickOutcome::Missed);
        assert!(coordinator.selected().is_empty());
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_membership_follows_toggle_parity() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));

        let clicks = [3, 1, 3, 7, 7, 7, 0, 1, 9, 3];
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for &id in &clicks {
            click(&mut coordinator, &mut scene, Some(id));
            *counts.entry(id).or_default() += 1;
            assert_consistent(&coordinator, &scene);
        }

        for id in pool() {
            let odd = counts.get(&id).copied().unwrap_or(0) % 2 == 1;
            assert_eq!(coordinator.is_selected(id), odd, "object {id}");
        }
    }

    #[test]
    fn test_clear_selection_releases_everything() {
        let (mut coordinator, mut scene) = setup();
        coordinator.handle_key(KeyTransition::Pressed(KeyCode::ShiftLeft));
        click(&mut coordinator, &mut scene, Some(2));
        click(&mut coordinator, &mut scene, Some(6));

        let released = coordinator.clear_selection(&mut scene);

        assert_eq!(released, 2);
        assert!(scene.group_children().is_empty());
        assert_eq!(scene.drag_targets, Some(DraggableSet::Individual(pool())));
        assert_consistent(&coordinator, &scene);
    }

    #[test]
    fn test_direct_toggle_ignores_unknown_ids() {
        let (mut coordinator, mut scene) = setup();

        assert_eq!(coordinator.toggle(42, &mut scene), ClickOutcome::Missed);
        assert_eq!(coordinator.toggle(8, &mut scene), ClickOutcome::Selected(8));
        assert_consistent(&coordinator, &scene);
    }
}
