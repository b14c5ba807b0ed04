//! State behind every list screen.

use api::Entity;

/// Fetched items plus the client-side filters applied on top of them.
///
/// Deleting is two steps: [`request_delete`](Self::request_delete) marks an
/// item, and only [`confirm_delete`](Self::confirm_delete) hands its id back for
/// the actual request. The item stays pending until the response arrives and
/// is settled with [`remove`](Self::remove) or
/// [`delete_failed`](Self::delete_failed).
#[derive(Clone, Debug, PartialEq)]
pub struct ManagerList<E> {
    items: Vec<E>,
    pub category: Option<String>,
    pub search: String,
    pending_delete: Option<i64>,
    delete_in_flight: bool,
}

impl<E> Default for ManagerList<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            category: None,
            search: String::new(),
            pending_delete: None,
            delete_in_flight: false,
        }
    }
}

impl<E: Entity + Clone> ManagerList<E> {
    pub fn new(items: Vec<E>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Swap in a fresh fetch, keeping filters. A pending delete for an item
    /// that no longer exists is dropped.
    pub fn replace_items(&mut self, items: Vec<E>) {
        self.items = items;
        if let Some(id) = self.pending_delete {
            if !self.items.iter().any(|e| e.id() == id) {
                self.settle_delete();
            }
        }
    }

    /// Items matching the category filter and the case-insensitive search over
    /// title and summary.
    pub fn visible(&self) -> Vec<E> {
        let needle = self.search.trim().to_lowercase();
        let category = self.category.as_deref().filter(|c| !c.is_empty());
        self.items
            .iter()
            .filter(|e| category.map_or(true, |c| e.category() == Some(c)))
            .filter(|e| {
                needle.is_empty()
                    || e.title().to_lowercase().contains(&needle)
                    || e.summary().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Distinct categories present in the list, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .items
            .iter()
            .filter_map(|e| e.category().map(str::to_string))
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn request_delete(&mut self, id: i64) {
        if !self.delete_in_flight && self.items.iter().any(|e| e.id() == id) {
            self.pending_delete = Some(id);
        }
    }

    /// Back out of a requested delete. Ignored once the request is sent.
    pub fn cancel_delete(&mut self) {
        if !self.delete_in_flight {
            self.pending_delete = None;
        }
    }

    pub fn pending_delete(&self) -> Option<&E> {
        let id = self.pending_delete?;
        self.items.iter().find(|e| e.id() == id)
    }

    /// True between [`confirm_delete`](Self::confirm_delete) and the response.
    pub fn is_deleting(&self) -> bool {
        self.delete_in_flight
    }

    /// Id to send the delete for. `None` when nothing was requested first or
    /// the request is already out.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        if self.delete_in_flight {
            return None;
        }
        let id = self.pending_delete?;
        self.delete_in_flight = true;
        Some(id)
    }

    /// Drop an item after the backend confirmed its deletion.
    pub fn remove(&mut self, id: i64) {
        self.items.retain(|e| e.id() != id);
        if self.pending_delete == Some(id) {
            self.settle_delete();
        }
    }

    /// The backend refused the delete; the item stays listed.
    pub fn delete_failed(&mut self, id: i64) {
        if self.pending_delete == Some(id) {
            self.settle_delete();
        }
    }

    fn settle_delete(&mut self) {
        self.pending_delete = None;
        self.delete_in_flight = false;
    }

    /// Apply `update` to the item with `id`, if present.
    pub fn update_item(&mut self, id: i64, update: impl FnOnce(&mut E)) {
        if let Some(item) = self.items.iter_mut().find(|e| e.id() == id) {
            update(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Service;

    fn service(id: i64, title: &str, summary: &str, category: &str) -> Service {
        Service {
            id,
            title: title.to_string(),
            summary: summary.to_string(),
            description: String::new(),
            category: category.to_string(),
            image_url: None,
        }
    }

    fn list() -> ManagerList<Service> {
        ManagerList::new(vec![
            service(1, "Due diligence", "Third-party checks", "audit"),
            service(2, "Training", "Annual ethics course", "education"),
            service(3, "Hotline", "Confidential reporting line", ""),
        ])
    }

    fn ids(items: &[Service]) -> Vec<i64> {
        items.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_search_covers_title_and_summary() {
        let mut list = list();
        list.search = "ETHICS".to_string();
        assert_eq!(ids(&list.visible()), [2]);
        list.search = "hot".to_string();
        assert_eq!(ids(&list.visible()), [3]);
        list.search = "  ".to_string();
        assert_eq!(list.visible().len(), 3);
    }

    #[test]
    fn test_category_filter_and_listing() {
        let mut list = list();
        assert_eq!(list.categories(), ["audit", "education"]);
        list.category = Some("audit".to_string());
        assert_eq!(ids(&list.visible()), [1]);
        list.category = Some(String::new());
        assert_eq!(list.visible().len(), 3);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut list = list();
        assert_eq!(list.confirm_delete(), None);

        list.request_delete(2);
        assert_eq!(list.pending_delete().map(|s| s.id), Some(2));
        list.cancel_delete();
        assert_eq!(list.confirm_delete(), None);

        list.request_delete(2);
        assert_eq!(list.confirm_delete(), Some(2));
        assert_eq!(list.confirm_delete(), None);
        list.remove(2);
        assert_eq!(ids(list.items()), [1, 3]);
        assert!(list.pending_delete().is_none());
        assert!(!list.is_deleting());
    }

    #[test]
    fn test_item_stays_pending_while_delete_is_in_flight() {
        let mut list = list();
        list.request_delete(2);
        assert_eq!(list.confirm_delete(), Some(2));

        assert!(list.is_deleting());
        assert_eq!(list.pending_delete().map(|s| s.id), Some(2));
        list.cancel_delete();
        list.request_delete(1);
        assert_eq!(list.pending_delete().map(|s| s.id), Some(2));

        list.delete_failed(2);
        assert!(!list.is_deleting());
        assert!(list.pending_delete().is_none());
        assert_eq!(ids(list.items()), [1, 2, 3]);

        list.request_delete(1);
        assert_eq!(list.confirm_delete(), Some(1));
    }

    #[test]
    fn test_request_delete_ignores_unknown_ids() {
        let mut list = list();
        list.request_delete(99);
        assert!(list.pending_delete().is_none());
    }

    #[test]
    fn test_replace_keeps_filters() {
        let mut list = list();
        list.search = "training".to_string();
        list.request_delete(1);
        list.replace_items(vec![service(2, "Training", "", "education")]);
        assert_eq!(list.search, "training");
        assert!(list.pending_delete().is_none());
        assert_eq!(ids(&list.visible()), [2]);
    }
}
