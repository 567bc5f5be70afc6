//! A chunk of query results.

use crate::pageable::Pageable;
use crate::sort::Sort;
use serde::{Deserialize, Serialize};

/// A chunk of content plus the page request it answers
///
/// A slice only knows whether a following chunk exists, not how many
/// elements there are in total (see [`crate::Page`] for that).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice<T> {
    content: Vec<T>,
    pageable: Option<Pageable>,
    has_next: bool,
}

impl<T> Slice<T> {
    pub fn new(content: Vec<T>, pageable: Option<Pageable>, has_next: bool) -> Self {
        Self {
            content,
            pageable,
            has_next,
        }
    }

    /// All content in one slice without a page request
    pub fn unpaged(content: Vec<T>) -> Self {
        Self::new(content, None, false)
    }

    /// Zero-based number of this slice; 0 when unpaged
    pub fn number(&self) -> usize {
        self.pageable.as_ref().map(Pageable::page_number).unwrap_or(0)
    }

    /// Requested slice size; 0 when unpaged
    pub fn size(&self) -> usize {
        self.pageable.as_ref().map(Pageable::page_size).unwrap_or(0)
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn has_previous(&self) -> bool {
        self.number() > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Request for the following slice, if there is one
    pub fn next_pageable(&self) -> Option<Pageable> {
        if self.has_next() {
            self.pageable.as_ref().map(Pageable::next)
        } else {
            None
        }
    }

    /// Request for the preceding slice, if there is one
    pub fn previous_pageable(&self) -> Option<Pageable> {
        if self.has_previous() {
            self.pageable.as_ref().map(Pageable::previous_or_first)
        } else {
            None
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn pageable(&self) -> Option<&Pageable> {
        self.pageable.as_ref()
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.pageable.as_ref().map(Pageable::sort)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    /// Convert the content, keeping the paging metadata
    pub fn map<U, F>(self, converter: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            content: self.content.into_iter().map(converter).collect(),
            pageable: self.pageable,
            has_next: self.has_next,
        }
    }
}

impl<T> IntoIterator for Slice<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Slice<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}
