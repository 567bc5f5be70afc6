//! Page requests.

use crate::sort::Sort;
use crate::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request for one page of results
///
/// Page numbers are zero-based. The size is always at least one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageableRepr")]
pub struct Pageable {
    page: usize,
    size: usize,
    sort: Sort,
}

/// Wire form of [`Pageable`], validated on the way in
#[derive(Deserialize)]
struct PageableRepr {
    page: usize,
    size: usize,
    #[serde(default)]
    sort: Sort,
}

impl TryFrom<PageableRepr> for Pageable {
    type Error = DomainError;

    fn try_from(repr: PageableRepr) -> Result<Self> {
        Pageable::sorted(repr.page, repr.size, repr.sort)
    }
}

impl Pageable {
    /// Request page `page` with `size` elements per page, unsorted
    pub fn of(page: usize, size: usize) -> Result<Self> {
        Self::sorted(page, size, Sort::unsorted())
    }

    /// Request page `page` with `size` elements per page and a sort
    pub fn sorted(page: usize, size: usize, sort: Sort) -> Result<Self> {
        if size < 1 {
            return Err(DomainError::InvalidArgument(
                "Page size must not be less than one".to_string(),
            ));
        }
        Ok(Self { page, size, sort })
    }

    /// First page of the given size
    pub fn first_of(size: usize) -> Result<Self> {
        Self::of(0, size)
    }

    pub fn page_number(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of elements skipped before this page, saturating at `usize::MAX`
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// The following page; the last representable page is its own successor
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    /// The previous page, or this page when already on the first one
    pub fn previous_or_first(&self) -> Self {
        if self.has_previous() {
            Self {
                page: self.page - 1,
                size: self.size,
                sort: self.sort.clone(),
            }
        } else {
            self.first()
        }
    }

    pub fn first(&self) -> Self {
        Self {
            page: 0,
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    pub fn with_sort(self, sort: Sort) -> Self {
        Self { sort, ..self }
    }
}

impl fmt::Display for Pageable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page request [number: {}, size {}, sort: {}]",
            self.page, self.size, self.sort
        )
    }
}
