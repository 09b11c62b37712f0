use crate::dtos::SERVICE_MESSAGE;
use crate::startup::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub provider_ready: bool,
    pub model: String,
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        title: SERVICE_MESSAGE,
        provider_ready: state.readiness.is_ready(),
        model: state.provider.model().to_string(),
    }
}
