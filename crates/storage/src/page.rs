// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pagination types for `Repository::list` (spec.md §6).

use serde::{Deserialize, Serialize};

/// A page request: 1-indexed page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// A page of results with pagination metadata (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(mut items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let offset = request.offset();
        items = if offset >= items.len() {
            Vec::new()
        } else {
            items.split_off(offset)
        };
        items.truncate(request.page_size as usize);

        let total_pages = if total == 0 {
            0
        } else {
            ((total - 1) / request.page_size as u64 + 1) as u32
        };
        let has_next = (request.page as u64) < total_pages as u64;

        Self {
            items,
            total,
            page: request.page,
            total_pages,
            has_next,
        }
    }
}
