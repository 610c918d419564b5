//! Page/size pagination for the search endpoint.
//!
//! Pages are zero-based. Defaults and the upper bound on `size` come from
//! [`SearchConfig`], so deployments can tune them without a rebuild.

use crate::catalog::query::PageRequest;
use crate::config::SearchConfig;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Pagination query parameters.
///
/// - `page`: Zero-based page index (default: 0)
/// - `size`: Records per page (default and maximum from configuration)
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageParams {
    /// Zero-based page index (default: 0)
    #[param(default = 0, minimum = 0)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<i64>,

    /// Records per page (default: 20, max: 100)
    #[param(default = 20, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub size: Option<i64>,
}

impl PageParams {
    /// Page index, clamped to be non-negative.
    #[inline]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    /// Page size, clamped between 1 and the configured maximum.
    #[inline]
    pub fn size(&self, config: &SearchConfig) -> i64 {
        self.size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1))
    }

    pub fn to_request(&self, config: &SearchConfig) -> PageRequest {
        PageRequest::new(self.page(), self.size(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig {
            default_page_size: 20,
            max_page_size: 100,
        }
    }

    #[test]
    fn test_default_values() {
        let p = PageParams::default();
        assert_eq!(p.to_request(&config()), PageRequest::new(0, 20));
    }

    #[test]
    fn test_size_clamping() {
        // Zero is clamped to 1
        let p = PageParams { page: None, size: Some(0) };
        assert_eq!(p.size(&config()), 1);

        // Over max is clamped to the configured maximum
        let p = PageParams {
            page: None,
            size: Some(1000),
        };
        assert_eq!(p.size(&config()), 100);

        let p = PageParams { page: None, size: Some(5) };
        assert_eq!(p.size(&config()), 5);
    }

    #[test]
    fn test_negative_page_clamps_to_zero() {
        let p = PageParams {
            page: Some(-3),
            size: None,
        };
        assert_eq!(p.page(), 0);

        let p = PageParams { page: Some(4), size: None };
        assert_eq!(p.page(), 4);
    }
}
