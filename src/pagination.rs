use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStatus {
    #[default]
    Idle,
    Loading { page: u32, generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub generation: u64,
}

/// Outcome of a page load that matched the in-flight request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    Shown(u32),
    Exhausted(u32),
}

/// Page cursor with a request-generation token.
///
/// Every accepted request bumps `generation`; completions carrying another
/// generation are stale and get discarded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub has_more: bool,
    /// Upper bound from configuration; `None` pages until an empty page.
    pub max_page: Option<u32>,
    pub status: PageStatus,
    pub generation: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Pagination {
    pub fn new(max_page: Option<u32>) -> Self {
        Self {
            current_page: 1,
            has_more: true,
            max_page: max_page.filter(|max| *max > 0),
            status: PageStatus::Idle,
            generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, PageStatus::Loading { .. })
    }

    pub fn can_next(&self) -> bool {
        self.within_max(self.current_page.saturating_add(1)) && self.has_more
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Starts loading `page`. Requests while a page is in flight are ignored.
    pub fn request(&mut self, page: u32) -> Option<PageRequest> {
        if self.is_loading() || page < 1 || !self.within_max(page) {
            return None;
        }
        if page > self.current_page && !self.has_more {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.status = PageStatus::Loading {
            page,
            generation: self.generation,
        };
        Some(PageRequest {
            page,
            generation: self.generation,
        })
    }

    /// Reloads the current page regardless of `has_more`, used at startup.
    pub fn request_current(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            return None;
        }
        let page = self.current_page;
        self.generation = self.generation.wrapping_add(1);
        self.status = PageStatus::Loading {
            page,
            generation: self.generation,
        };
        Some(PageRequest {
            page,
            generation: self.generation,
        })
    }

    pub fn next(&mut self) -> Option<PageRequest> {
        if !self.can_next() {
            return None;
        }
        self.request(self.current_page + 1)
    }

    pub fn prev(&mut self) -> Option<PageRequest> {
        if !self.can_prev() {
            return None;
        }
        self.request(self.current_page - 1)
    }

    /// Finishes the in-flight load. `None` means the result is stale.
    ///
    /// An empty page marks the end of the catalog and keeps the cursor where
    /// it was.
    pub fn complete(&mut self, generation: u64, empty: bool) -> Option<PageOutcome> {
        let PageStatus::Loading {
            page,
            generation: expected,
        } = self.status
        else {
            return None;
        };
        if expected != generation {
            return None;
        }
        self.status = PageStatus::Idle;
        self.has_more = !empty;
        if empty {
            return Some(PageOutcome::Exhausted(page));
        }
        self.current_page = page;
        Some(PageOutcome::Shown(page))
    }

    /// Leaves the loading state after a failed fetch. Returns false when stale.
    pub fn fail(&mut self, generation: u64) -> bool {
        match self.status {
            PageStatus::Loading {
                generation: expected,
                ..
            } if expected == generation => {
                self.status = PageStatus::Idle;
                true
            }
            _ => false,
        }
    }

    fn within_max(&self, page: u32) -> bool {
        self.max_page.map_or(true, |max| page <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_page_one_with_more() {
        let pages = Pagination::default();
        assert_eq!(pages.current_page, 1);
        assert!(pages.has_more);
        assert!(!pages.can_prev());
        assert!(pages.can_next());
    }

    #[test]
    fn rejects_out_of_range_and_while_loading() {
        let mut pages = Pagination::new(Some(3));
        assert_eq!(pages.request(0), None);
        assert_eq!(pages.request(4), None);

        let first = pages.request(2).expect("accepted");
        assert_eq!(pages.request(3), None);
        assert_eq!(pages.complete(first.generation, false), Some(PageOutcome::Shown(2)));
        assert_eq!(pages.current_page, 2);
        assert!(pages.next().is_some());
    }

    #[test]
    fn empty_page_ends_paging_without_moving() {
        let mut pages = Pagination::default();
        let req = pages.next().expect("page 2");
        assert_eq!(pages.complete(req.generation, true), Some(PageOutcome::Exhausted(2)));
        assert_eq!(pages.current_page, 1);
        assert!(!pages.has_more);
        assert!(!pages.can_next());
        assert_eq!(pages.next(), None);
        assert_eq!(pages.request(5), None);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut pages = Pagination::default();
        let first = pages.request(1).expect("page 1");
        assert!(pages.fail(first.generation));
        let second = pages.request(2).expect("page 2");
        assert_eq!(pages.complete(first.generation, false), None);
        assert!(pages.is_loading());
        assert_eq!(pages.complete(second.generation, false), Some(PageOutcome::Shown(2)));
    }

    #[test]
    fn failure_returns_to_idle() {
        let mut pages = Pagination::default();
        let req = pages.next().expect("page 2");
        assert!(!pages.fail(req.generation + 1));
        assert!(pages.fail(req.generation));
        assert!(!pages.is_loading());
        assert_eq!(pages.current_page, 1);
        assert!(pages.has_more);
    }

    #[test]
    fn max_page_caps_next() {
        let mut pages = Pagination::new(Some(1));
        assert!(!pages.can_next());
        assert_eq!(pages.next(), None);
    }
}
