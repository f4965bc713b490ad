//! Page arithmetic for the filtered product listing.
//!
//! Pages are 1-based. A request for a page past the end is clamped to the
//! last page instead of producing an empty page or an error; callers that
//! render pagination controls rely on always getting rows back when the
//! match set is non-empty.

use serde::Serialize;

use crate::error::CoreError;

/// Page served when the client does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PER_PAGE: i64 = 10;

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A validated pagination cursor: `pagina >= 1` and `por_pagina >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pagina: i64,
    por_pagina: i64,
}

impl PageRequest {
    pub fn new(pagina: i64, por_pagina: i64) -> Result<Self, CoreError> {
        if pagina < 1 {
            return Err(CoreError::Validation(
                "'pagina' debe ser un número mayor o igual a 1.".to_string(),
            ));
        }
        if por_pagina < 1 {
            return Err(CoreError::Validation(
                "'por_pagina' debe ser un número mayor o igual a 1.".to_string(),
            ));
        }
        Ok(Self { pagina, por_pagina })
    }

    pub fn pagina(&self) -> i64 {
        self.pagina
    }

    pub fn por_pagina(&self) -> i64 {
        self.por_pagina
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            pagina: DEFAULT_PAGE,
            por_pagina: DEFAULT_PER_PAGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// `ceil(total / per_page)`. Zero when there is nothing to page through.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let per_page = per_page.max(1);
    total / per_page + i64::from(total % per_page != 0)
}

/// Clamp a requested page into `1..=total_pages`.
pub fn clamp_page(requested: i64, total_pages: i64) -> i64 {
    requested.min(total_pages).max(1)
}

/// Row offset of the first row on `page`.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(per_page.max(1))
}

/// The slice of rows to fetch once the match count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The page actually served (after clamping).
    pub page: i64,
    pub total_pages: i64,
    /// Bound as `LIMIT`.
    pub limit: i64,
    /// Bound as `OFFSET`.
    pub offset: i64,
}

/// Plan the page query for `total` matching rows.
///
/// Returns `None` when `total` is zero: no page query should be issued.
pub fn plan_window(request: &PageRequest, total: i64) -> Option<PageWindow> {
    if total <= 0 {
        return None;
    }
    let total_pages = total_pages(total, request.por_pagina);
    let page = clamp_page(request.pagina, total_pages);
    Some(PageWindow {
        page,
        total_pages,
        limit: request.por_pagina,
        offset: page_offset(page, request.por_pagina),
    })
}

// ---------------------------------------------------------------------------
// PagedResult
// ---------------------------------------------------------------------------

/// One page of results plus the counts needed to render pagination controls.
///
/// Serialized with the field names the storefront reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T> {
    #[serde(rename = "productos")]
    pub items: Vec<T>,
    #[serde(rename = "total_resultados")]
    pub total: i64,
    #[serde(rename = "pagina_actual")]
    pub page: i64,
    #[serde(rename = "total_paginas")]
    pub total_pages: i64,
}

impl<T> PagedResult<T> {
    /// Result for an empty match set. Echoes the requested page back.
    pub fn empty(requested: &PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: requested.pagina,
            total_pages: 0,
        }
    }

    pub fn from_window(items: Vec<T>, total: i64, window: &PageWindow) -> Self {
        Self {
            items,
            total,
            page: window.page,
            total_pages: window.total_pages,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
