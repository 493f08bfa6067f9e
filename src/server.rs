use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::app::{self, InputId, Inputs};
use crate::data::filter::{filter_table, SortMode};
use crate::error::DashboardError;
use crate::state::AppState;
use crate::ui::chart::{self, ChartSpec};
use crate::ui::panels;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/_update", post(update))
        .route("/api/figure", get(figure))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// The page with both regions rendered for the default control values.
async fn index(State(state): State<AppState>) -> Html<String> {
    let inputs = Inputs::default();
    let outputs = app::dispatch(&state.dataset, &[], &inputs);
    Html(panels::render_page(&inputs, &outputs))
}

// ---------------------------------------------------------------------------
// Control change dispatch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    #[serde(default)]
    changed: Vec<InputId>,
    inputs: Inputs,
}

#[derive(Debug, Serialize)]
struct UpdateResponse {
    outputs: BTreeMap<&'static str, String>,
}

async fn update(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Json<UpdateResponse> {
    let outputs = app::dispatch(&state.dataset, &req.changed, &req.inputs)
        .into_iter()
        .map(|(id, html)| (id.as_str(), html))
        .collect();
    Json(UpdateResponse { outputs })
}

// ---------------------------------------------------------------------------
// Chart specification as JSON
// ---------------------------------------------------------------------------

/// Query string for `/api/figure`; absent parameters take the control defaults.
/// `countries` is comma separated.
#[derive(Debug, Deserialize)]
struct FigureQuery {
    variable: Option<String>,
    countries: Option<String>,
    min_age: Option<i64>,
    max_age: Option<i64>,
}

impl FigureQuery {
    fn into_inputs(self) -> Inputs {
        let defaults = Inputs::default();
        Inputs {
            variable: self.variable.unwrap_or(defaults.variable),
            countries: match self.countries {
                Some(list) => list
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => defaults.countries,
            },
            min_age: self.min_age.unwrap_or(defaults.min_age),
            max_age: self.max_age.unwrap_or(defaults.max_age),
        }
    }
}

async fn figure(
    State(state): State<AppState>,
    Query(query): Query<FigureQuery>,
) -> Result<Json<ChartSpec>, DashboardError> {
    let inputs = query.into_inputs();
    let view = filter_table(&state.dataset, &inputs.criteria(), SortMode::CountryAsc);
    let spec = chart::build_chart(&view, &inputs.variable)?;
    Ok(Json(spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::data::model::tests::player;
    use crate::data::model::Dataset;

    fn test_router() -> Router {
        router(AppState::new(Dataset::from_records(vec![
            player("Dustin Johnson", "United States", 36, 1850.0),
            player("Vijay Singh", "Fiji", 57, 50.0),
            player("Matthew Wolff", "United States", 21, 600.0),
        ])))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn index_renders_both_regions() {
        let response = test_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(">3 Players in Selected Criteria"));
        assert!(html.contains("<td>Dustin Johnson</td>"));
        let pos = |needle: &str| html.find(needle).unwrap();
        assert!(pos("<td>Dustin Johnson</td>") < pos("<td>Matthew Wolff</td>"));
        assert!(pos("<td>Matthew Wolff</td>") < pos("<td>Vijay Singh</td>"));
    }

    #[tokio::test]
    async fn update_returns_only_bound_regions() {
        let body = serde_json::json!({
            "changed": ["variable_dropdown"],
            "inputs": {
                "variable_dropdown": "Earnings",
                "country_checklist": ["United States"],
                "min_age_checklist": 15,
                "max_age_checklist": 60
            }
        });
        let response = test_router()
            .oneshot(
                Request::post("/_update")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let outputs = json["outputs"].as_object().unwrap();
        assert_eq!(outputs.len(), 1);
        let chart = outputs["pga_plot"].as_str().unwrap();
        assert!(chart.contains(">2 Players in Selected Criteria"));
    }

    #[tokio::test]
    async fn update_rejects_unknown_control() {
        let body = serde_json::json!({
            "changed": ["shoe_size"],
            "inputs": {
                "variable_dropdown": "Earnings",
                "country_checklist": [],
                "min_age_checklist": 15,
                "max_age_checklist": 60
            }
        });
        let response = test_router()
            .oneshot(
                Request::post("/_update")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn figure_filters_by_query() {
        let response = test_router()
            .oneshot(
                Request::get("/api/figure?variable=Sand_Save_Pct&countries=United%20States&min_age=30")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let spec: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(spec["title"], "1 Players in Selected Criteria");
        assert_eq!(spec["x_label"], "Sand_Save_Pct");
        assert_eq!(spec["points"].as_array().unwrap().len(), 1);
        assert!(spec["trendline"].is_null());
    }

    #[tokio::test]
    async fn figure_rejects_unknown_variable() {
        let response = test_router()
            .oneshot(
                Request::get("/api/figure?variable=Age")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "unknown statistic field 'Age'");
    }
}
