use crate::repositories::Pagination;

pub const DEFAULT_PAGE_SIZE: u64 = 6;

/// A 1-based page number together with the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Missing page numbers or page numbers below 1 select the first page.
    pub fn new(page: Option<u64>, per_page: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.max(1),
        }
    }

    pub const fn page(&self) -> u64 {
        self.page
    }

    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn to_pagination(self) -> Pagination {
        Pagination {
            offset: Some((self.page - 1).saturating_mul(self.per_page)),
            limit: Some(self.per_page),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: vec![],
            request,
            total_items: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.request.per_page())
    }

    pub fn prev_page(&self) -> Option<u64> {
        (self.request.page() > 1).then(|| self.request.page() - 1)
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.request.page() < self.total_pages()).then(|| self.request.page() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_numbers() {
        assert_eq!(1, PageRequest::new(None, 6).page());
        assert_eq!(1, PageRequest::new(Some(0), 6).page());
        assert_eq!(3, PageRequest::new(Some(3), 6).page());
        assert_eq!(1, PageRequest::new(Some(3), 0).per_page());
    }

    #[test]
    fn offset_and_limit() {
        let p = PageRequest::new(Some(3), 6).to_pagination();
        assert_eq!(Some(12), p.offset);
        assert_eq!(Some(6), p.limit);
    }

    #[test]
    fn neighbour_pages() {
        let page = Page::<()> {
            items: vec![],
            request: PageRequest::new(Some(2), 6),
            total_items: 13,
        };
        assert_eq!(3, page.total_pages());
        assert_eq!(Some(1), page.prev_page());
        assert_eq!(Some(3), page.next_page());

        let page = Page::<()>::empty(PageRequest::default());
        assert_eq!(0, page.total_pages());
        assert_eq!(None, page.prev_page());
        assert_eq!(None, page.next_page());
    }
}
