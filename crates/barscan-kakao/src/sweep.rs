//! Per-cell paginated sweep over the category-search endpoint.

use std::time::Duration;

use barscan_core::{AppConfig, GridCell, PlaceRecord};

use crate::client::{CategoryQuery, KakaoClient};

/// Fixed parameters for every cell sweep in one search.
#[derive(Debug, Clone)]
pub struct SweepParams {
    pub category_group_code: String,
    /// Radius around the cell center; independent of the cell size.
    pub radius_m: u32,
    pub page_size: u32,
    /// Safety cap on pages per cell. Hitting it ends the sweep normally.
    pub max_pages: u32,
    /// Substring that a record's category path must contain to be kept.
    pub category_filter: String,
    /// Pause between consecutive pages of one cell.
    pub page_delay: Duration,
}

impl SweepParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            category_group_code: config.category_group_code.clone(),
            radius_m: config.search_radius_m,
            page_size: config.results_per_page,
            max_pages: config.max_page,
            category_filter: config.category_filter.clone(),
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }
}

/// `true` if `record` falls under `filter` in the category hierarchy.
///
/// Subcategories extend the parent path (`"음식점 > 술집 > 포장마차"`), so a
/// substring match on the parent selects the whole subtree.
#[must_use]
pub fn matches_category(record: &PlaceRecord, filter: &str) -> bool {
    record.category_path.contains(filter)
}

/// A [`KakaoClient`] bound to the parameters of one search.
pub struct CategorySweep {
    client: KakaoClient,
    params: SweepParams,
}

impl CategorySweep {
    #[must_use]
    pub fn new(client: KakaoClient, params: SweepParams) -> Self {
        Self { client, params }
    }

    /// Sweeps every page for one cell and returns the records that pass the
    /// category filter. Documents without an ID are skipped.
    ///
    /// Pages are requested in order starting at 1 until the API reports the
    /// last page or `max_pages` pages have been fetched. A failed page ends the
    /// sweep for this cell only: the failure is logged and the records gathered
    /// so far are returned. Failed pages are not retried.
    pub async fn search_cell(&self, cell: &GridCell) -> Vec<PlaceRecord> {
        let params = &self.params;
        let mut records = Vec::new();
        let mut page = 1u32;

        while page <= params.max_pages {
            let query = CategoryQuery {
                category_group_code: &params.category_group_code,
                x: cell.center.lng,
                y: cell.center.lat,
                radius_m: params.radius_m,
                page,
                size: params.page_size,
            };

            let response = match self.client.category_page(&query).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(
                        page,
                        lat = cell.center.lat,
                        lng = cell.center.lng,
                        kept = records.len(),
                        error = %e,
                        "category page failed; truncating sweep for this cell"
                    );
                    break;
                }
            };

            if page == 1 {
                tracing::trace!(
                    total_count = ?response.meta.total_count,
                    pageable_count = ?response.meta.pageable_count,
                    "category search totals"
                );
            }

            let fetched = response.documents.len();
            let before = records.len();
            records.extend(
                response
                    .documents
                    .into_iter()
                    .map(PlaceRecord::from)
                    .filter(|r| !r.id.is_empty())
                    .filter(|r| matches_category(r, &params.category_filter)),
            );
            tracing::trace!(
                page,
                fetched,
                kept = records.len() - before,
                "category page fetched"
            );

            if response.meta.is_end {
                break;
            }
            page += 1;

            if page <= params.max_pages && !params.page_delay.is_zero() {
                tokio::time::sleep(params.page_delay).await;
            }
        }

        if page > params.max_pages {
            tracing::debug!(
                max_pages = params.max_pages,
                lat = cell.center.lat,
                lng = cell.center.lng,
                "page cap reached before the last page"
            );
        }

        records
    }
}
