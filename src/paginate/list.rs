use std::collections::HashSet;

use crate::api::Page;

use super::identified::Identified;

/// Client-side merge of successive pages.
///
/// Invariants:
/// - no two items share an id; the first-seen copy wins
/// - once a total is known, `items().len() <= total()`
/// - `current_page` only increases until [`reset`](Self::reset)
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedList<T: Identified> {
    items: Vec<T>,
    seen: HashSet<T::Id>,
    current_page: u32,
    total: Option<u64>,
}

impl<T: Identified> Default for AccumulatedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            current_page: 1,
            total: None,
        }
    }
}

impl<T: Identified> AccumulatedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear items, seen ids, total and page counter together.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Merge a page in server order, skipping ids already present.
    ///
    /// Returns how many items were added. The page's total becomes the known
    /// total; if the server now reports fewer than are already held, the
    /// total is raised to the held count.
    pub fn append_page(&mut self, page: Page<T>) -> usize {
        let before = self.items.len();
        for item in page.data {
            if self.seen.insert(item.id()) {
                self.items.push(item);
            }
        }
        self.total = Some(page.total.max(self.items.len() as u64));
        self.items.len() - before
    }

    /// Advance the page counter. Returns the new page number.
    pub fn load_more(&mut self) -> u32 {
        self.current_page = self.current_page.saturating_add(1);
        self.current_page
    }

    /// True while fewer items are held than the last reported total.
    /// False until a page has been merged.
    pub fn has_more(&self) -> bool {
        self.total
            .is_some_and(|total| (self.items.len() as u64) < total)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.seen.contains(id)
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        title: &'static str,
    }

    impl Identified for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32) -> Item {
        Item { id, title: "" }
    }

    fn page(total: u64, page: u32, ids: &[u32]) -> Page<Item> {
        Page {
            total,
            page,
            limit: 5,
            data: ids.iter().copied().map(item).collect(),
        }
    }

    fn ids(list: &AccumulatedList<Item>) -> Vec<u32> {
        list.items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn overlapping_pages_keep_first_seen_order() {
        let mut list = AccumulatedList::new();
        list.append_page(page(3, 1, &[1, 2]));
        list.append_page(page(3, 2, &[2, 3]));
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn duplicates_do_not_update_stored_fields() {
        let mut list = AccumulatedList::new();
        list.append_page(Page {
            total: 2,
            page: 1,
            limit: 1,
            data: vec![Item { id: 1, title: "first" }],
        });
        let added = list.append_page(Page {
            total: 2,
            page: 2,
            limit: 1,
            data: vec![Item { id: 1, title: "edited" }],
        });
        assert_eq!(added, 0);
        assert_eq!(list.items()[0].title, "first");
    }

    #[test]
    fn has_more_tracks_total() {
        let mut list = AccumulatedList::new();
        assert!(!list.has_more());

        list.append_page(page(7, 1, &[1, 2, 3, 4, 5]));
        assert!(list.has_more());

        list.append_page(page(7, 2, &[6, 7]));
        assert_eq!(list.len(), 7);
        assert!(!list.has_more());
    }

    #[test]
    fn reset_matches_fresh_list() {
        let mut reused = AccumulatedList::new();
        reused.append_page(page(10, 1, &[9, 8, 7]));
        reused.load_more();
        reused.reset();
        reused.append_page(page(2, 1, &[1, 2]));

        let mut fresh = AccumulatedList::new();
        fresh.append_page(page(2, 1, &[1, 2]));

        assert_eq!(reused, fresh);
        assert!(!reused.contains(&9));
    }

    #[test]
    fn load_more_advances_page() {
        let mut list: AccumulatedList<Item> = AccumulatedList::new();
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.load_more(), 2);
        assert_eq!(list.current_page(), 2);
    }

    #[test]
    fn shrinking_total_never_drops_below_held_items() {
        let mut list = AccumulatedList::new();
        list.append_page(page(6, 1, &[1, 2, 3, 4, 5]));
        list.append_page(page(4, 2, &[6]));
        assert_eq!(list.total(), Some(6));
        assert!(!list.has_more());
    }
}
