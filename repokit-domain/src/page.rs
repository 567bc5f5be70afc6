//! A slice with a known total.

use crate::pageable::Pageable;
use crate::slice::Slice;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A [`Slice`] that also knows the total number of elements
///
/// All slice accessors are available through `Deref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    slice: Slice<T>,
    total: u64,
}

impl<T> Page<T> {
    /// Create a page; the total is corrected upwards when the content proves
    /// there are more elements than `total` claims.
    pub fn new(content: Vec<T>, pageable: Option<Pageable>, total: u64) -> Self {
        let total = match &pageable {
            Some(p)
                if !content.is_empty() && p.offset().saturating_add(p.page_size()) as u64 > total =>
            {
                p.offset().saturating_add(content.len()) as u64
            }
            Some(_) => total,
            None => total.max(content.len() as u64),
        };

        let has_next = match &pageable {
            Some(p) => {
                (p.page_number() as u64).saturating_add(1) < total_pages_for(total, p.page_size())
            }
            None => false,
        };

        Self {
            slice: Slice::new(content, pageable, has_next),
            total,
        }
    }

    /// All content as a single page
    pub fn unpaged(content: Vec<T>) -> Self {
        let total = content.len() as u64;
        Self::new(content, None, total)
    }

    pub fn total_elements(&self) -> u64 {
        self.total
    }

    /// Number of pages; 1 when unpaged
    pub fn total_pages(&self) -> u64 {
        total_pages_for(self.total, self.slice.size())
    }

    pub fn into_slice(self) -> Slice<T> {
        self.slice
    }

    /// Convert the content, keeping paging metadata and total
    pub fn map<U, F>(self, converter: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            slice: self.slice.map(converter),
            total: self.total,
        }
    }
}

fn total_pages_for(total: u64, size: usize) -> u64 {
    if size == 0 {
        1
    } else {
        total.div_ceil(size as u64)
    }
}

impl<T> Deref for Page<T> {
    type Target = Slice<T>;

    fn deref(&self) -> &Self::Target {
        &self.slice
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slice.into_iter()
    }
}
