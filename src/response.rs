//! Paged response envelope.

use crate::page::{Page, PageMeta};
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub page: PageMeta,
}

impl<T> From<Page<T>> for PagedResponse<T> {
    fn from(page: Page<T>) -> Self {
        let meta = PageMeta::from(&page);
        PagedResponse {
            content: page.content,
            page: meta,
        }
    }
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_page<T: Serialize>(page: Page<T>) -> (StatusCode, Json<PagedResponse<T>>) {
    (StatusCode::OK, Json(PagedResponse::from(page)))
}
