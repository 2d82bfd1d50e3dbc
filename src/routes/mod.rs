//! Thin Actix handlers exposing the dashboard JSON API under `/api/v1`.
//!
//! Handlers parse path/query input, call a service and serialize the result;
//! every failure goes through [`error_response`] so the SPA always receives
//! `{ "message": … }` with a meaningful status code.

use actix_web::HttpResponse;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::types::DateRange;
use crate::listview::{ListState, SortDirection, SortKey};
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;
use crate::sync::SourceError;

pub mod accounts;
pub mod audiences;
pub mod campaigns;
pub mod keywords;
pub mod recommendations;

pub(crate) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "not found" }))
}

/// Maps a service failure onto the JSON error contract.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match &err {
        ServiceError::NotFound | ServiceError::Repository(RepositoryError::NotFound) => {
            not_found()
        }
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(json!({ "message": message }))
        }
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(json!({ "message": message }))
        }
        ServiceError::Source(SourceError::NotFound(_)) => {
            HttpResponse::NotFound().json(json!({ "message": err.to_string() }))
        }
        _ => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(json!({ "message": "internal server error" }))
        }
    }
}

/// Resolves an optional `from`/`to` pair; absent means the last 30 days.
pub(crate) fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<DateRange, ServiceError> {
    match (from, to) {
        (Some(from), Some(to)) => DateRange::new(from, to).map_err(ServiceError::from),
        (None, None) => Ok(DateRange::last_30_days()),
        _ => Err(ServiceError::Validation(
            "from and to must be given together".to_string(),
        )),
    }
}

/// Query parameters shared by every list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    search: Option<String>,
    sort: Option<String>,
    dir: Option<String>,
    page: Option<usize>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl ListParams {
    /// Page is applied last: setting search or sort resets it.
    pub(crate) fn list_state(&self) -> ListState {
        let mut state = ListState::default();
        if let Some(search) = self.search.as_deref() {
            state.set_search_term(search);
        }
        if let Some(field) = self.sort.as_deref() {
            let direction = match self.dir.as_deref() {
                Some("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
            state.sort = Some(SortKey {
                field: field.to_string(),
                direction,
            });
        }
        if let Some(page) = self.page {
            state.set_page(page);
        }
        state
    }

    pub(crate) fn date_range(&self) -> Result<DateRange, ServiceError> {
        resolve_range(self.from, self.to)
    }
}

/// Date window for the account summary.
#[derive(Debug, Deserialize)]
pub(crate) struct RangeParams {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl RangeParams {
    pub(crate) fn date_range(&self) -> Result<DateRange, ServiceError> {
        resolve_range(self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_build_a_sorted_state() {
        let params = ListParams {
            search: Some("verano".to_string()),
            sort: Some("clicks".to_string()),
            dir: Some("desc".to_string()),
            page: Some(3),
            from: None,
            to: None,
        };

        let state = params.list_state();
        assert_eq!(state.search_term, "verano");
        assert_eq!(
            state.sort,
            Some(SortKey {
                field: "clicks".to_string(),
                direction: SortDirection::Desc,
            })
        );
        assert_eq!(state.page, 3);
    }

    #[test]
    fn missing_window_defaults_to_last_30_days() {
        let range = resolve_range(None, None).unwrap();
        assert_eq!(range, DateRange::last_30_days());
    }

    #[test]
    fn half_open_window_is_rejected() {
        let err = resolve_range(NaiveDate::from_ymd_opt(2026, 6, 1), None).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = resolve_range(
            NaiveDate::from_ymd_opt(2026, 6, 30),
            NaiveDate::from_ymd_opt(2026, 6, 1),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
