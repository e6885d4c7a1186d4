//! Paged result envelope

use serde::{Deserialize, Serialize};

/// One page of records plus the server-reported total, when known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Records on this page, in server order
    pub items: Vec<T>,

    /// Total number of matching records (from the `x-total-count` header)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> PagedResult<T> {
    /// Creates a page without a known total
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
        }
    }

    /// Sets the known total
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the page, returning its records
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Offset cookie for the page after this one, or `None` if this is the
    /// last page.
    ///
    /// With a known total the decision is exact. Without one, a short page
    /// ends the sequence.
    pub fn next_offset(&self, offset: u64, limit: u64) -> Option<u64> {
        // Past u64::MAX there is no further page to address
        let next = offset.checked_add(self.items.len() as u64)?;
        match self.total_count {
            Some(total) if next >= total => None,
            Some(_) if self.items.is_empty() => None,
            Some(_) => Some(next),
            None if (self.items.len() as u64) < limit || self.items.is_empty() => None,
            None => Some(next),
        }
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_offset_with_total() {
        let page = PagedResult::new(vec![1, 2]).with_total_count(5);
        assert_eq!(page.next_offset(0, 2), Some(2));
        assert_eq!(page.next_offset(2, 2), Some(4));

        let last = PagedResult::new(vec![5]).with_total_count(5);
        assert_eq!(last.next_offset(4, 2), None);
    }

    #[test]
    fn test_next_offset_full_last_page_with_total() {
        let last = PagedResult::new(vec![3, 4]).with_total_count(4);
        assert_eq!(last.next_offset(2, 2), None);
    }

    #[test]
    fn test_next_offset_without_total() {
        let full = PagedResult::new(vec![1, 2]);
        assert_eq!(full.next_offset(0, 2), Some(2));

        let short = PagedResult::new(vec![1]);
        assert_eq!(short.next_offset(2, 2), None);

        let empty: PagedResult<i32> = PagedResult::default();
        assert_eq!(empty.next_offset(4, 2), None);
    }

    #[test]
    fn test_empty_page_with_stale_total_ends() {
        let page: PagedResult<i32> = PagedResult::new(vec![]).with_total_count(10);
        assert_eq!(page.next_offset(4, 2), None);
    }

    #[test]
    fn test_next_offset_at_u64_limit_ends() {
        let page = PagedResult::new(vec![1, 2]);
        assert_eq!(page.next_offset(u64::MAX, 2), None);
        assert_eq!(page.next_offset(u64::MAX - 1, 2), None);
        assert_eq!(page.next_offset(u64::MAX - 2, 2), Some(u64::MAX));

        let page = PagedResult::new(vec![1, 2]).with_total_count(u64::MAX);
        assert_eq!(page.next_offset(u64::MAX - 1, 2), None);
    }
}
