//! Request handlers: converter page, form submission, JSON API, health.

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::render::{render_page, PageView};
use crate::http::server::AppState;
use crate::pace::{pace_to_speed, project_races, speed_to_pace, Pace, PaceError};

/// Error type for the JSON API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Invalid(#[from] PaceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// GET `/` — the converter page with zeroed defaults.
pub async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

/// Fields of the converter form. The submit buttons double as the mode
/// selector, so everything is optional at the type level.
#[derive(Debug, Deserialize)]
pub struct ConvertForm {
    pub minutes: Option<String>,
    pub seconds: Option<String>,
    pub kmperhour: Option<String>,
    pub converttokmperh: Option<String>,
    pub converttominperkm: Option<String>,
}

/// POST `/` — perform the selected conversion and re-render the page.
pub async fn convert(Form(form): Form<ConvertForm>) -> Response {
    match convert_view(&form) {
        Ok(view) => Html(render_page(&view)).into_response(),
        Err(message) => {
            let view = PageView {
                error: Some(message),
                ..PageView::default()
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Html(render_page(&view))).into_response()
        }
    }
}

fn convert_view(form: &ConvertForm) -> Result<PageView, String> {
    let (pace, pace_display) = if form.converttokmperh.is_some() {
        let minutes = parse_field(form.minutes.as_deref(), "minutes")?;
        let seconds = parse_field(form.seconds.as_deref(), "seconds")?;
        let pace = Pace::new(minutes, seconds).map_err(|e| e.to_string())?;
        let speed = pace_to_speed(pace);
        (pace, speed.to_string())
    } else if form.converttominperkm.is_some() {
        let raw = form
            .kmperhour
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "km/h is required".to_string())?;
        let km_per_hour: f64 = raw
            .parse()
            .map_err(|_| "km/h must be a number".to_string())?;
        let pace = speed_to_pace(km_per_hour).map_err(|e| e.to_string())?;
        (pace, format!("{km_per_hour:.2}"))
    } else {
        return Err("no conversion selected".to_string());
    };

    let races = project_races(pace, 0.0).map_err(|e| e.to_string())?;

    Ok(PageView {
        minutes: pace.minutes,
        seconds: pace.seconds,
        pace: pace_display,
        races,
        error: None,
    })
}

fn parse_field(value: Option<&str>, name: &str) -> Result<u32, String> {
    let value = value.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("0");
    value
        .parse()
        .map_err(|_| format!("{name} must be a whole number"))
}

/// Query parameters for `/api/convert`. Provide either a pace or a speed.
#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    pub kmh: Option<f64>,
}

/// JSON body returned by `/api/convert`.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub minutes: u32,
    pub seconds: u32,
    pub km_per_hour: f64,
}

/// GET `/api/convert` — convert in either direction.
pub async fn api_convert(
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let (pace, km_per_hour) = match query {
        ConvertQuery { kmh: Some(kmh), .. } => (speed_to_pace(kmh)?, kmh),
        ConvertQuery {
            minutes, seconds, ..
        } if minutes.is_some() || seconds.is_some() => {
            let pace = Pace::new(minutes.unwrap_or(0), seconds.unwrap_or(0))?;
            (pace, pace_to_speed(pace).km_per_hour())
        }
        _ => {
            return Err(ApiError::BadRequest(
                "provide either minutes/seconds or kmh".to_string(),
            ))
        }
    };

    Ok(Json(ConvertResponse {
        minutes: pace.minutes,
        seconds: pace.seconds,
        km_per_hour: round2(km_per_hour),
    }))
}

/// Query parameters for `/api/races`.
#[derive(Debug, Deserialize)]
pub struct RacesQuery {
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    /// Optional extra distance in kilometres.
    pub distance: Option<f64>,
}

/// JSON body returned by `/api/races`.
#[derive(Debug, Serialize)]
pub struct RacesResponse {
    pub minutes: u32,
    pub seconds: u32,
    pub races: crate::pace::RaceProjections,
}

/// GET `/api/races` — project finish times at the given pace.
pub async fn api_races(Query(query): Query<RacesQuery>) -> Result<Json<RacesResponse>, ApiError> {
    if query.minutes.is_none() && query.seconds.is_none() {
        return Err(ApiError::BadRequest(
            "provide minutes and seconds".to_string(),
        ));
    }
    let pace = Pace::new(query.minutes.unwrap_or(0), query.seconds.unwrap_or(0))?;
    let races = project_races(pace, query.distance.unwrap_or(0.0))?;

    Ok(Json(RacesResponse {
        minutes: pace.minutes,
        seconds: pace.seconds,
        races,
    }))
}

/// GET `/health` — the liveness verdict.
pub async fn health(State(state): State<AppState>) -> Response {
    if state.liveness.is_healthy() {
        (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "consecutive_failures": state.liveness.consecutive_failures(),
            })),
        )
            .into_response()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_pace_to_speed() {
        let form = ConvertForm {
            minutes: Some("5".into()),
            seconds: Some("30".into()),
            kmperhour: None,
            converttokmperh: Some("1".into()),
            converttominperkm: None,
        };
        let view = convert_view(&form).unwrap();
        assert_eq!(view.pace, "10.91");
        assert_eq!(view.minutes, 5);
        assert_eq!(view.seconds, 30);
        assert_eq!(view.races.ten_k, "0h55min00s");
    }

    #[test]
    fn form_speed_to_pace() {
        let form = ConvertForm {
            minutes: None,
            seconds: None,
            kmperhour: Some("12".into()),
            converttokmperh: None,
            converttominperkm: Some("1".into()),
        };
        let view = convert_view(&form).unwrap();
        assert_eq!(view.minutes, 5);
        assert_eq!(view.seconds, 0);
        assert_eq!(view.races.five_k, "0h25min00s");
    }

    #[test]
    fn form_empty_minutes_defaults_to_zero() {
        let form = ConvertForm {
            minutes: Some("".into()),
            seconds: Some("30".into()),
            kmperhour: None,
            converttokmperh: Some("1".into()),
            converttominperkm: None,
        };
        let view = convert_view(&form).unwrap();
        assert_eq!(view.minutes, 0);
        assert_eq!(view.seconds, 30);
    }

    #[test]
    fn form_rejects_garbage_and_zero_pace() {
        let garbage = ConvertForm {
            minutes: Some("abc".into()),
            seconds: Some("0".into()),
            kmperhour: None,
            converttokmperh: Some("1".into()),
            converttominperkm: None,
        };
        assert!(convert_view(&garbage).is_err());

        let zero = ConvertForm {
            minutes: Some("0".into()),
            seconds: Some("0".into()),
            kmperhour: None,
            converttokmperh: Some("1".into()),
            converttominperkm: None,
        };
        assert!(convert_view(&zero).is_err());
    }

    #[test]
    fn form_requires_a_mode() {
        let form = ConvertForm {
            minutes: Some("5".into()),
            seconds: Some("0".into()),
            kmperhour: None,
            converttokmperh: None,
            converttominperkm: None,
        };
        assert_eq!(convert_view(&form).unwrap_err(), "no conversion selected");
    }
}
