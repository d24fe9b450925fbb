use axum::{extract::State, response::IntoResponse, Json};
use millwright_entity::default_settings;

use crate::{
    error::{AppError, Result},
    seed::{get_default_settings, seed_default_settings},
    AppState, DefaultSettingsResponse, SeedResponse,
};

// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "millwright-backend",
        "timestamp": chrono::Utc::now()
    }))
}

// Default settings used to prefill a fresh planner
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<DefaultSettingsResponse>> {
    let settings = get_default_settings(&state.db)
        .await?
        .ok_or(AppError::SettingsNotFound)?;

    Ok(Json(settings_response(settings)))
}

// Re-run the startup seed; a no-op once settings exist
pub async fn seed_settings(State(state): State<AppState>) -> Result<Json<SeedResponse>> {
    let outcome = seed_default_settings(&state.db, &state.config.default_settings_path).await?;

    tracing::info!("Manual seed finished: {:?}", outcome);

    Ok(Json(SeedResponse {
        outcome: outcome.status(),
        settings_id: outcome.settings_id(),
        timestamp: chrono::Utc::now(),
    }))
}

fn settings_response(settings: default_settings::Model) -> DefaultSettingsResponse {
    DefaultSettingsResponse {
        id: settings.id,
        resource_limits: settings.resource_limits,
        weights: settings.weights,
        recipes_off: settings.recipes_off,
        inputs: settings.inputs,
        outputs: settings.outputs,
        max_item: settings.max_item,
        checkbox_nuclear_waste: settings.checkbox_nuclear_waste,
        created_at: settings.created_at,
    }
}
