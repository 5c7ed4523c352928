use std::collections::BTreeSet;

/// One entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A clickable page number.
    Page(u64),
    /// A collapsed run of pages.
    Ellipsis,
}

/// 1-based inclusive range of rows shown on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    /// First row number.
    pub first: u64,
    /// Last row number, never above the total.
    pub last: u64,
}

/// Everything a pager widget needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Total rows.
    pub total: u64,
    /// Rows per page.
    pub page_size: u64,
    /// Page being displayed.
    pub current_page: u64,
    /// At least one.
    pub total_pages: u64,
    /// Rows on the current page; `None` when there is nothing to show.
    pub range: Option<ItemRange>,
    /// Page strip; `None` when a single page needs no controls.
    pub controls: Option<Vec<PageSlot>>,
}

impl Pagination {
    /// "Showing 21 to 40 of 45 results".
    pub fn range_label(&self) -> Option<String> {
        self.range.map(|range| {
            format!("Showing {} to {} of {} results", range.first, range.last, self.total)
        })
    }

    /// Whether a "previous" button is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a "next" button is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// `max(1, ceil(total / page_size))`. A zero page size counts as one.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Clamps `page` into `1..=total_pages`.
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}

/// Derives page count, row range and page strip.
pub fn paginate(total: u64, page_size: u64, current_page: u64) -> Pagination {
    let page_size = page_size.max(1);
    let current_page = current_page.max(1);
    let pages = total_pages(total, page_size);

    let first = (current_page - 1).saturating_mul(page_size).saturating_add(1);
    let last = current_page.saturating_mul(page_size).min(total);
    let range = (total > 0 && first <= total).then_some(ItemRange {
        first,
        last,
    });

    let controls = (pages > 1).then(|| page_window(current_page, pages));

    Pagination {
        total,
        page_size,
        current_page,
        total_pages: pages,
        range,
        controls,
    }
}

fn page_window(current: u64, total_pages: u64) -> Vec<PageSlot> {
    let mut pages = BTreeSet::from([1, total_pages]);
    for page in current.saturating_sub(1)..=current.saturating_add(1) {
        if (1..=total_pages).contains(&page) {
            pages.insert(page);
        }
    }

    let mut slots = Vec::with_capacity(pages.len() * 2);
    let mut previous = None;
    for page in pages {
        if let Some(prev) = previous {
            if page - prev > 1 {
                slots.push(PageSlot::Ellipsis);
            }
        }
        slots.push(PageSlot::Page(page));
        previous = Some(page);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages_of(slots: &[PageSlot]) -> Vec<u64> {
        slots
            .iter()
            .filter_map(|slot| match slot {
                PageSlot::Page(page) => Some(*page),
                PageSlot::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn middle_page_of_three() {
        let pagination = paginate(45, 20, 2);
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(
            pagination.range,
            Some(ItemRange {
                first: 21,
                last: 40,
            })
        );
        assert_eq!(
            pagination.controls,
            Some(vec![PageSlot::Page(1), PageSlot::Page(2), PageSlot::Page(3)])
        );
        assert_eq!(pagination.range_label().as_deref(), Some("Showing 21 to 40 of 45 results"));
    }

    #[test]
    fn last_page_is_partial() {
        let pagination = paginate(45, 20, 3);
        assert_eq!(
            pagination.range,
            Some(ItemRange {
                first: 41,
                last: 45,
            })
        );
        assert!(!pagination.has_next());
        assert!(pagination.has_previous());
    }

    #[test]
    fn empty_listing_has_no_range_and_no_controls() {
        let pagination = paginate(0, 20, 1);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.range, None);
        assert_eq!(pagination.controls, None);
        assert_eq!(pagination.range_label(), None);
    }

    #[test]
    fn single_page_needs_no_controls() {
        let pagination = paginate(20, 20, 1);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.controls, None);
        assert_eq!(
            pagination.range,
            Some(ItemRange {
                first: 1,
                last: 20,
            })
        );
    }

    #[test]
    fn gaps_collapse_symmetrically() {
        let pagination = paginate(200, 20, 5);
        assert_eq!(
            pagination.controls,
            Some(vec![
                PageSlot::Page(1),
                PageSlot::Ellipsis,
                PageSlot::Page(4),
                PageSlot::Page(5),
                PageSlot::Page(6),
                PageSlot::Ellipsis,
                PageSlot::Page(10),
            ])
        );
    }

    #[test]
    fn single_missing_page_is_still_an_ellipsis() {
        let pagination = paginate(100, 20, 4);
        assert_eq!(
            pagination.controls,
            Some(vec![
                PageSlot::Page(1),
                PageSlot::Ellipsis,
                PageSlot::Page(3),
                PageSlot::Page(4),
                PageSlot::Page(5),
            ])
        );
    }

    #[test]
    fn out_of_range_page_reports_no_rows() {
        let pagination = paginate(45, 20, 7);
        assert_eq!(pagination.range, None);
        let pages = pagination.controls.as_deref().map(pages_of).unwrap_or_default();
        assert_eq!(pages, vec![1, 3]);
    }

    #[test]
    fn invariants_hold_across_inputs() {
        for total in 0..=130u64 {
            for page_size in 1..=25u64 {
                let expected_pages = std::cmp::max(1, total.div_ceil(page_size));
                for current in 1..=expected_pages + 1 {
                    let pagination = paginate(total, page_size, current);
                    assert_eq!(pagination.total_pages, expected_pages);
                    if let Some(range) = pagination.range {
                        assert!(range.last <= total);
                        assert!(range.first <= range.last);
                    }
                    if let Some(slots) = &pagination.controls {
                        let pages = pages_of(slots);
                        assert_eq!(pages.first(), Some(&1));
                        assert_eq!(pages.last(), Some(&expected_pages));
                        if current <= expected_pages {
                            assert!(pages.contains(&current));
                        }
                        assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
                        assert!(slots
                            .windows(2)
                            .all(|pair| pair != [PageSlot::Ellipsis, PageSlot::Ellipsis]));
                    } else {
                        assert_eq!(expected_pages, 1);
                    }
                }
            }
        }
    }

    #[test]
    fn clamp_keeps_pages_in_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(2, 0), 1);
    }
}
