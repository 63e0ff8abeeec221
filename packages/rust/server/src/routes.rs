use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use glean_shared::GleanError;

use crate::AppState;

/// Query string of `GET /outline`. `topic` is accepted as an alias of `country`.
///
/// Repeated parameters keep their first value.
#[derive(Debug, Default)]
pub struct OutlineQuery {
    pub country: Option<String>,
    pub topic: Option<String>,
}

impl OutlineQuery {
    /// Build from raw query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "country" => &mut query.country,
                "topic" => &mut query.topic,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    fn topic(&self) -> Option<&str> {
        non_blank(&self.country).or_else(|| non_blank(&self.topic))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Outline endpoint
///
/// Returns the heading outline as plain text, 400 when no topic is given,
/// 500 when the reference page cannot be fetched.
pub async fn outline_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => OutlineQuery::from_pairs(pairs),
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let Some(topic) = query.topic() else {
        return error_response(StatusCode::BAD_REQUEST, GleanError::missing("country").to_string());
    };

    match state.outline.fetch_outline(topic).await {
        Ok(outline) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            outline,
        )
            .into_response(),
        Err(e) => {
            warn!(topic, error = %e, "outline request failed");
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, describe(&e, topic))
        }
    }
}

fn describe(err: &GleanError, topic: &str) -> String {
    match err {
        GleanError::Status { .. } => format!("failed to fetch reference page for {topic}"),
        other => other.to_string(),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_value_wins() {
        let query = OutlineQuery::from_pairs(pairs(&[("country", "Chile"), ("country", "Peru")]));
        assert_eq!(query.topic(), Some("Chile"));
    }

    #[test]
    fn blank_country_falls_through_to_topic() {
        let query = OutlineQuery::from_pairs(pairs(&[("country", " "), ("topic", "Peru")]));
        assert_eq!(query.topic(), Some("Peru"));
    }

    #[test]
    fn country_takes_precedence_over_topic() {
        let query = OutlineQuery::from_pairs(pairs(&[("topic", "Peru"), ("country", "Chile")]));
        assert_eq!(query.topic(), Some("Chile"));
    }

    #[test]
    fn unrelated_parameters_are_ignored() {
        let query = OutlineQuery::from_pairs(pairs(&[("lang", "en")]));
        assert_eq!(query.topic(), None);
    }
}
