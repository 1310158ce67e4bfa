//! Page request and page slice returned by the paged listing.

use crate::error::AppError;
use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Zero-based page index and page size. Construct with [`PageRequest::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    number: i64,
    size: i64,
}

impl PageRequest {
    pub fn new(number: i64, size: i64) -> Result<Self, AppError> {
        if number < 0 {
            return Err(AppError::BadRequest("page index must not be negative".into()));
        }
        if size < 1 {
            return Err(AppError::BadRequest("page size must be at least 1".into()));
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.number.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One window of results plus the totals needed to navigate the rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub size: i64,
    pub number: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements <= 0 {
            0
        } else {
            total_elements / request.size + i64::from(total_elements % request.size != 0)
        };
        Self {
            content,
            size: request.size,
            number: request.number,
            total_elements,
            total_pages,
        }
    }
}

/// Pagination metadata as serialized to clients.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub size: i64,
    pub number: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        PageMeta {
            size: page.size,
            number: page.number,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_index_and_empty_size() {
        assert!(matches!(PageRequest::new(-1, 10), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::new(0, 0), Err(AppError::BadRequest(_))));
        assert!(PageRequest::new(0, 1).is_ok());
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::new(2, 10).expect("valid request");
        let page = Page::new(vec![1, 2, 3, 4, 5], request, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(request.offset(), 20);

        let empty: Page<i32> = Page::new(Vec::new(), PageRequest::default(), 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn largest_page_size_does_not_overflow() {
        let request = PageRequest::new(0, i64::MAX).expect("valid request");
        let page = Page::new(vec![1], request, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(request.offset(), 0);

        let far = PageRequest::new(i64::MAX, i64::MAX).expect("valid request");
        assert_eq!(far.offset(), i64::MAX);
        assert_eq!(Page::<i32>::new(Vec::new(), far, i64::MAX).total_pages, 1);
    }
}
