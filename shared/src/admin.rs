//! Admin dashboard data fetching.
//!
//! [`AdminQueryController`] owns the filters, the page position and the last
//! loaded data. Like the poller it does no I/O: mutations hand back a
//! [`ListRequest`] (and, on refresh, an [`AnalyticsRequest`]) carrying a
//! sequence number. Results are applied only when they answer the most
//! recently issued request of their kind, so a slow response for an old
//! filter/page combination can never overwrite a newer one.

use crate::{
    config::ClientConfig,
    error::ApiError,
    gateway::{ApiGateway, HttpTransport},
    model::{AdminSubmissionPage, AnalyticsSnapshot, Rating, Status},
    pagination::{self, Pagination},
    session::SessionStore,
};

/// A filterable column of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Exact star rating.
    Rating,
    /// Exact status.
    Status,
    /// Free-text search in the review.
    Search,
}

impl FilterField {
    /// Query-string key sent to the server.
    pub fn query_key(self) -> &'static str {
        match self {
            FilterField::Rating => "rating",
            FilterField::Status => "status",
            FilterField::Search => "q",
        }
    }
}

/// Active constraints. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Rating to match.
    pub rating: Option<Rating>,
    /// Status to match.
    pub status: Option<Status>,
    /// Text to search for, never blank.
    pub search: Option<String>,
}

impl FilterState {
    /// No constraint set.
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.status.is_none() && self.search.is_none()
    }

    /// Updates one field from its selectable representation.
    ///
    /// `""` and `"all"` clear rating and status; a blank search clears the
    /// search. Invalid values leave the filters untouched.
    pub fn set(&mut self, field: FilterField, raw: &str) -> Result<(), ApiError> {
        let value = raw.trim();
        let cleared = value.is_empty() || value.eq_ignore_ascii_case("all");
        match field {
            FilterField::Rating => {
                self.rating = if cleared {
                    None
                } else {
                    let rating = value
                        .parse::<u8>()
                        .ok()
                        .and_then(Rating::new)
                        .ok_or_else(|| ApiError::Validation(format!("Invalid rating: {value}")))?;
                    Some(rating)
                };
            },
            FilterField::Status => {
                self.status = if cleared {
                    None
                } else {
                    let status = Status::parse(value)
                        .ok_or_else(|| ApiError::Validation(format!("Invalid status: {value}")))?;
                    Some(status)
                };
            },
            FilterField::Search => {
                self.search = (!value.is_empty()).then(|| value.to_string());
            },
        }
        Ok(())
    }

    /// Selectable representation of one field; `""` when unset.
    pub fn value_of(&self, field: FilterField) -> String {
        match field {
            FilterField::Rating => self.rating.map(|r| r.to_string()).unwrap_or_default(),
            FilterField::Status => self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            FilterField::Search => self.search.clone().unwrap_or_default(),
        }
    }
}

/// Page position within the filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: u64,
    page_size: u64,
    total_items: u64,
}

impl PageState {
    /// First page of an empty listing.
    pub fn new(page_size: u64) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// 1-based page.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows matching the filters, as last reported by the server.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// `max(1, ceil(total / size))`.
    pub fn total_pages(&self) -> u64 {
        pagination::total_pages(self.total_items, self.page_size)
    }

    /// Server offset for the current page.
    pub fn offset(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    fn set_page(&mut self, page: u64) {
        self.current_page = page.max(1);
    }

    /// Records a new total and clamps the page; returns whether it moved.
    fn set_total(&mut self, total: u64) -> bool {
        self.total_items = total;
        let clamped = pagination::clamp_page(self.current_page, self.total_pages());
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }
}

/// Parameters of one listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminQuery {
    /// Rating constraint.
    pub rating: Option<Rating>,
    /// Status constraint.
    pub status: Option<Status>,
    /// Search constraint.
    pub search: Option<String>,
    /// Page size.
    pub limit: u64,
    /// Rows to skip.
    pub offset: u64,
}

impl AdminQuery {
    /// Query for `filters` at the given window.
    pub fn new(filters: &FilterState, limit: u64, offset: u64) -> Self {
        Self {
            rating: filters.rating,
            status: filters.status,
            search: filters.search.clone(),
            limit,
            offset,
        }
    }

    /// Key/value pairs in wire order. Absent constraints are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(rating) = self.rating {
            pairs.push((FilterField::Rating.query_key(), rating.get().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push((FilterField::Status.query_key(), status.as_str().to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push((FilterField::Search.query_key(), search.to_string()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Load state of one dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Never requested.
    Idle,
    /// A request is outstanding.
    Loading,
    /// Latest data.
    Ready(T),
    /// The latest request failed.
    Errored(ApiError),
}

impl<T> LoadState<T> {
    /// Loaded value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            LoadState::Idle | LoadState::Loading | LoadState::Errored(_) => None,
        }
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Error of the latest request.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Errored(err) => Some(err),
            LoadState::Idle | LoadState::Loading | LoadState::Ready(_) => None,
        }
    }
}

/// A listing fetch to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Sequence number to hand back to [`AdminQueryController::apply_list`].
    pub seq: u64,
    /// What to fetch.
    pub query: AdminQuery,
}

impl ListRequest {
    /// Runs the request through `gateway`.
    pub async fn send<T: HttpTransport>(
        &self,
        gateway: &ApiGateway<T>,
    ) -> Result<AdminSubmissionPage, ApiError> {
        gateway.list_admin_submissions(&self.query).await
    }
}

/// An analytics fetch to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsRequest {
    /// Sequence number to hand back to
    /// [`AdminQueryController::apply_analytics`].
    pub seq: u64,
}

impl AnalyticsRequest {
    /// Runs the request through `gateway`.
    pub async fn send<T: HttpTransport>(
        &self,
        gateway: &ApiGateway<T>,
    ) -> Result<AnalyticsSnapshot, ApiError> {
        gateway.fetch_analytics().await
    }
}

/// Both fetches triggered by a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    /// Listing fetch.
    pub list: ListRequest,
    /// Analytics fetch.
    pub analytics: AnalyticsRequest,
}

/// Result of feeding a response back into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// State updated.
    Updated,
    /// A newer request superseded this one; nothing changed.
    Stale,
    /// The new total moved the current page; fetch this page instead.
    Reclamped(ListRequest),
}

/// Filters, paging and loaded data of the admin dashboard.
#[derive(Debug)]
pub struct AdminQueryController {
    filters: FilterState,
    page: PageState,
    list: LoadState<AdminSubmissionPage>,
    analytics: LoadState<AnalyticsSnapshot>,
    list_seq: u64,
    analytics_seq: u64,
    session: SessionStore,
}

impl AdminQueryController {
    /// Controller with no filters on page 1.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        Self {
            filters: FilterState::default(),
            page: PageState::new(config.page_size),
            list: LoadState::Idle,
            analytics: LoadState::Idle,
            list_seq: 0,
            analytics_seq: 0,
            session,
        }
    }

    /// Active filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Page position.
    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Listing panel state.
    pub fn list_state(&self) -> &LoadState<AdminSubmissionPage> {
        &self.list
    }

    /// Analytics panel state.
    pub fn analytics_state(&self) -> &LoadState<AnalyticsSnapshot> {
        &self.analytics
    }

    /// Pager view for the current page and total.
    pub fn pagination(&self) -> Pagination {
        pagination::paginate(
            self.page.total_items(),
            self.page.page_size(),
            self.page.current_page(),
        )
    }

    /// Query for the current filters and page.
    pub fn current_query(&self) -> AdminQuery {
        AdminQuery::new(&self.filters, self.page.page_size(), self.page.offset())
    }

    /// Changes one filter and goes back to page 1.
    pub fn set_filter(&mut self, field: FilterField, raw: &str) -> Result<ListRequest, ApiError> {
        self.filters.set(field, raw)?;
        self.page.set_page(1);
        Ok(self.issue_list())
    }

    /// Jumps to `page`. The caller keeps it within the pager's bounds.
    pub fn set_page(&mut self, page: u64) -> ListRequest {
        self.page.set_page(page);
        self.issue_list()
    }

    /// Drops every filter and goes back to page 1.
    pub fn clear_filters(&mut self) -> ListRequest {
        self.filters = FilterState::default();
        self.page.set_page(1);
        self.issue_list()
    }

    /// Re-issues the current listing together with analytics.
    pub fn refresh(&mut self) -> Refresh {
        Refresh {
            list: self.issue_list(),
            analytics: self.issue_analytics(),
        }
    }

    /// Applies a listing result if `seq` is the latest listing request.
    pub fn apply_list(
        &mut self,
        seq: u64,
        result: Result<AdminSubmissionPage, ApiError>,
    ) -> Applied {
        if seq != self.list_seq {
            tracing::warn!(seq, latest = self.list_seq, "discarding stale listing result");
            return Applied::Stale;
        }

        match result {
            Ok(page) => {
                let moved = self.page.set_total(page.total);
                if moved {
                    tracing::debug!(
                        page = self.page.current_page(),
                        total = page.total,
                        "page out of range, refetching"
                    );
                    return Applied::Reclamped(self.issue_list());
                }
                self.list = LoadState::Ready(page);
            },
            Err(err) => {
                self.expire_session_on(&err);
                self.list = LoadState::Errored(err);
            },
        }
        Applied::Updated
    }

    /// Applies an analytics result if `seq` is the latest analytics request.
    pub fn apply_analytics(
        &mut self,
        seq: u64,
        result: Result<AnalyticsSnapshot, ApiError>,
    ) -> Applied {
        if seq != self.analytics_seq {
            tracing::warn!(seq, latest = self.analytics_seq, "discarding stale analytics result");
            return Applied::Stale;
        }

        self.analytics = match result {
            Ok(snapshot) => LoadState::Ready(snapshot),
            Err(err) => {
                self.expire_session_on(&err);
                LoadState::Errored(err)
            },
        };
        Applied::Updated
    }

    /// Sends `request` and applies the outcome, following any re-clamp.
    pub async fn load_list<T: HttpTransport>(
        &mut self,
        gateway: &ApiGateway<T>,
        request: ListRequest,
    ) -> &LoadState<AdminSubmissionPage> {
        let mut request = request;
        loop {
            let result = request.send(gateway).await;
            match self.apply_list(request.seq, result) {
                Applied::Reclamped(next) => request = next,
                Applied::Updated | Applied::Stale => return &self.list,
            }
        }
    }

    /// Sends `request` and applies the outcome.
    pub async fn load_analytics<T: HttpTransport>(
        &mut self,
        gateway: &ApiGateway<T>,
        request: AnalyticsRequest,
    ) -> &LoadState<AnalyticsSnapshot> {
        let result = request.send(gateway).await;
        self.apply_analytics(request.seq, result);
        &self.analytics
    }

    fn expire_session_on(&self, err: &ApiError) {
        if err.is_auth_failure() && self.session.is_authenticated() {
            tracing::info!("credential rejected, clearing session");
            self.session.clear();
        }
    }

    fn issue_list(&mut self) -> ListRequest {
        self.list_seq += 1;
        self.list = LoadState::Loading;
        ListRequest {
            seq: self.list_seq,
            query: self.current_query(),
        }
    }

    fn issue_analytics(&mut self) -> AnalyticsRequest {
        self.analytics_seq += 1;
        self.analytics = LoadState::Loading;
        AnalyticsRequest {
            seq: self.analytics_seq,
        }
    }
}
