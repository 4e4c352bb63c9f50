//! Pagination extractor for API routes
//!
//! `PaginatedQuery<T>` reads `page` and `size` from the query string, then the
//! handler's own filter arguments `T` from the remaining parameters. Bounds and
//! defaults come from the [`PaginationConfig`] in the router state.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRef, FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::form_urlencoded;
use utoipa::IntoParams;
use validator::Validate;

use crate::core::PaginationConfig;
use crate::pagination::{PAGE_KEY, PageArgs, PageError, SIZE_KEY};

/// Paging query parameters
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-based)
    #[validate(range(min = 1, message = "Page must be >= 1"))]
    pub page: Option<u32>,
    /// Items per page
    pub size: Option<u32>,
}

/// Page window plus the handler's filter arguments
#[derive(Debug)]
pub struct PaginatedQuery<T> {
    pub page: PageArgs,
    pub args: T,
}

impl<S, T> FromRequestParts<S> for PaginatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    PaginationConfig: FromRef<S>,
{
    type Rejection = PageQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = PaginationConfig::from_ref(state);

        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(PageQueryRejection::Query)?;
        params.validate().map_err(PageQueryRejection::Validation)?;

        let size = params.size.unwrap_or(config.default_size);
        if !config.accepts_size(size) {
            return Err(PageQueryRejection::SizeOutOfRange {
                min: config.min_size,
                max: config.max_size,
            });
        }
        let page = PageArgs::new(params.page.unwrap_or(config.default_page), size)
            .map_err(PageQueryRejection::Page)?;

        let uri = without_page_keys(&parts.uri)?;
        let Query(args) = Query::<T>::try_from_uri(&uri).map_err(PageQueryRejection::Query)?;

        Ok(Self { page, args })
    }
}

/// `uri` reduced to its query string minus the `page` and `size` parameters
fn without_page_keys(uri: &Uri) -> Result<Uri, PageQueryRejection> {
    let remaining = form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .filter(|(key, _)| key != PAGE_KEY && key != SIZE_KEY);
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(remaining)
        .finish();
    format!("/?{query}")
        .parse()
        .map_err(|_| PageQueryRejection::MalformedQuery)
}

/// Paging rejection with structured error response
#[derive(Debug)]
pub enum PageQueryRejection {
    /// Failed to parse query string
    Query(QueryRejection),
    /// Query string could not be rebuilt without the paging parameters
    MalformedQuery,
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
    /// Page size outside the configured bounds
    SizeOutOfRange { min: u32, max: u32 },
    /// Page window cannot be formed
    Page(PageError),
}

impl IntoResponse for PageQueryRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Query(rejection) => ("QUERY_PARSE_ERROR", rejection.body_text()),
            Self::MalformedQuery => ("QUERY_PARSE_ERROR", "Malformed query string".to_string()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
            Self::SizeOutOfRange { min, max } => (
                "SIZE_OUT_OF_RANGE",
                format!("Size must be between {} and {}", min, max),
            ),
            Self::Page(e) => (e.code(), e.to_string()),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
