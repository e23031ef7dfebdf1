//! Ordered widget sequence
//!
//! Every mutation swaps in a freshly built sequence, so snapshots handed out
//! earlier never observe later edits.

use super::widget::{ChartKind, Widget, WidgetPatch, WidgetSize, default_layout};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WidgetList {
    widgets: Arc<Vec<Widget>>,
}

impl Default for WidgetList {
    fn default() -> Self {
        Self::new(default_layout())
    }
}

impl WidgetList {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self {
            widgets: Arc::new(widgets),
        }
    }

    /// Shared, immutable view of the current order.
    pub fn snapshot(&self) -> Arc<Vec<Widget>> {
        Arc::clone(&self.widgets)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.widgets.iter().map(|w| w.id.clone()).collect()
    }

    /// Append a new widget with defaulted fields and return its id.
    pub fn add(&mut self) -> String {
        self.add_with_rng(&mut rand::thread_rng())
    }

    pub fn add_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let kind = if rng.gen_bool(0.5) {
            ChartKind::Line
        } else {
            ChartKind::Bar
        };
        let id = self.fresh_id(chrono::Utc::now().timestamp_millis());
        let widget = Widget::new(id.clone(), "New Widget", kind)
            .with_subtitle("New chart widget")
            .with_size(WidgetSize::Medium);

        let mut next = self.widgets.as_ref().clone();
        next.push(widget);
        self.replace(next);
        id
    }

    /// Time-based id, suffixed when the millisecond is already taken.
    fn fresh_id(&self, millis: i64) -> String {
        let base = format!("widget-{}", millis);
        if self.find(&base).is_none() {
            return base;
        }
        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| self.find(candidate).is_none())
            .unwrap_or(base)
    }

    /// Remove by id. Absent ids are ignored.
    pub fn remove(&mut self, id: &str) {
        if self.find(id).is_none() {
            return;
        }
        let next = self
            .widgets
            .iter()
            .filter(|w| w.id != id)
            .cloned()
            .collect();
        self.replace(next);
    }

    /// Merge `patch` into the widget with the given id. Absent ids are ignored.
    pub fn update(&mut self, id: &str, patch: WidgetPatch) {
        if self.find(id).is_none() {
            return;
        }
        let next = self
            .widgets
            .iter()
            .map(|w| {
                if w.id == id {
                    let mut updated = w.clone();
                    updated.apply(patch.clone());
                    updated
                } else {
                    w.clone()
                }
            })
            .collect();
        self.replace(next);
    }

    pub fn resize(&mut self, id: &str, size: WidgetSize) {
        self.update(id, WidgetPatch::size(size));
    }

    /// Array-move: take the item at `old_index` and insert it at `new_index`.
    ///
    /// Returns whether the order changed.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.widgets.len();
        if old_index == new_index || old_index >= len || new_index >= len {
            return false;
        }
        let mut next = self.widgets.as_ref().clone();
        let moved = next.remove(old_index);
        next.insert(new_index, moved);
        self.replace(next);
        true
    }

    /// Move the `active` widget to the position currently held by `over`.
    pub fn move_by_id(&mut self, active: &str, over: &str) -> bool {
        if active == over {
            return false;
        }
        match (self.index_of(active), self.index_of(over)) {
            (Some(from), Some(to)) => self.reorder(from, to),
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.replace(default_layout());
    }

    fn replace(&mut self, next: Vec<Widget>) {
        self.widgets = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn list_of(n: usize) -> WidgetList {
        WidgetList::new(
            (0..n)
                .map(|i| Widget::new(format!("w{}", i), format!("Widget {}", i), ChartKind::Bar))
                .collect(),
        )
    }

    #[test]
    fn reorder_is_a_permutation_with_relative_order_kept() {
        for n in 1..6 {
            for i in 0..n {
                for j in 0..n {
                    let mut list = list_of(n);
                    let before = list.ids();
                    list.reorder(i, j);
                    let after = list.ids();

                    let mut sorted_before = before.clone();
                    let mut sorted_after = after.clone();
                    sorted_before.sort();
                    sorted_after.sort();
                    assert_eq!(sorted_before, sorted_after);

                    assert_eq!(after[j], before[i]);
                    let rest_before: Vec<_> = before.iter().filter(|id| **id != before[i]).collect();
                    let rest_after: Vec<_> = after.iter().filter(|id| **id != before[i]).collect();
                    assert_eq!(rest_before, rest_after);
                }
            }
        }
    }

    #[test]
    fn reorder_to_same_position_is_noop() {
        let mut list = list_of(3);
        let snapshot = list.snapshot();
        assert!(!list.reorder(1, 1));
        assert!(Arc::ptr_eq(&snapshot, &list.snapshot()));
    }

    #[test]
    fn reorder_out_of_bounds_is_noop() {
        let mut list = list_of(3);
        assert!(!list.reorder(0, 3));
        assert!(!list.reorder(7, 0));
        assert_eq!(list.ids(), vec!["w0", "w1", "w2"]);
    }

    #[test]
    fn add_then_remove_restores_sequence() {
        let mut list = WidgetList::default();
        let before = list.snapshot();

        let id = list.add_with_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(list.len(), before.len() + 1);
        let added = list.find(&id).unwrap();
        assert_eq!(added.size, WidgetSize::Medium);
        assert_eq!(added.title, "New Widget");

        list.remove(&id);
        assert_eq!(*list.snapshot(), *before);
    }

    #[test]
    fn added_ids_stay_unique_within_one_millisecond() {
        let mut list = WidgetList::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            list.add_with_rng(&mut rng);
        }
        let mut ids = list.ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn remove_unknown_id_is_silent() {
        let mut list = list_of(2);
        list.remove("missing");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn snapshots_do_not_see_later_mutations() {
        let mut list = list_of(3);
        let snapshot = list.snapshot();
        list.update("w1", WidgetPatch::size(WidgetSize::Large));
        list.reorder(0, 2);

        assert_eq!(snapshot[1].size, WidgetSize::Medium);
        assert_eq!(snapshot[0].id, "w0");
        assert_eq!(list.find("w1").unwrap().size, WidgetSize::Large);
    }

    #[test]
    fn move_by_id_matches_drag_end_semantics() {
        let mut list = list_of(4);
        assert!(list.move_by_id("w0", "w2"));
        assert_eq!(list.ids(), vec!["w1", "w2", "w0", "w3"]);
        assert!(!list.move_by_id("w1", "w1"));
        assert!(!list.move_by_id("w1", "nope"));
    }

    #[test]
    fn reset_restores_default_layout() {
        let mut list = WidgetList::default();
        list.remove("widget-1");
        list.add();
        list.reset();
        assert_eq!(list.ids(), vec!["widget-1", "widget-2", "widget-3", "widget-4"]);
    }
}
