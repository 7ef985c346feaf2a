//! Action-dispatch gateway
//!
//! One endpoint, dispatching on the `action` query parameter. Every
//! response is HTTP 200 with a `{success, data|message}` envelope; the
//! clients this replaces cannot read HTTP status codes and match on the
//! envelope (and on specific message strings) instead.
//!
//! POST bodies may arrive as `text/plain` - the original web client sends
//! JSON under that content type to avoid a CORS preflight - so the handler
//! takes the raw body and parses JSON itself. A malformed body degrades to
//! an empty object and surfaces as a missing-field message from typed
//! parsing.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use tare_core::{normalize_date, User, WeightEntry, LOCK_WAIT};

use crate::AppState;

const MISSING_ACTION: &str = "Missing 'action' parameter. Check your API request.";

/// The fixed response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GatewayParams {
    action: Option<String>,
    user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    user_name: String,
    /// Clients set this and expect it echoed back; absent means "now"
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    height_cm: Option<f64>,
    #[serde(default)]
    target_weight: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteUserRequest {
    user_name: String,
}

#[derive(Debug, Deserialize)]
struct SaveWeightRequest {
    user_name: String,
    /// Accepted as a string so datetime-suffixed forms normalize
    date: String,
    weight_kg: f64,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteWeightRequest {
    user_name: String,
    date: String,
}

/// Single entry point for all six actions
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GatewayParams>,
    body: String,
) -> Json<Envelope> {
    let action = match params.action {
        Some(action) => action,
        None => return Json(Envelope::err(MISSING_ACTION)),
    };

    debug!(%action, "Dispatching gateway request");

    // The store calls are synchronous and the lock wait can run for
    // seconds; keep all of it off the async workers.
    let user_name = params.user_name;
    let result =
        tokio::task::spawn_blocking(move || run_action(&state, &action, user_name.as_deref(), &body))
            .await
            .unwrap_or_else(|e| Err(e.to_string()));

    match result {
        Ok(data) => Json(Envelope::ok(data)),
        Err(message) => Json(Envelope::err(message)),
    }
}

/// Run one action under the store lock
///
/// The lock covers reads as well as writes, matching the original
/// backend's lock-per-request behavior. Errors come back as the message
/// string for the envelope.
fn run_action(
    state: &AppState,
    action: &str,
    query_user: Option<&str>,
    body: &str,
) -> Result<serde_json::Value, String> {
    let _guard = state
        .db
        .lock()
        .acquire(LOCK_WAIT)
        .map_err(|e| e.to_string())?;

    match action {
        "GET_USERS" => {
            let users = state.db.list_users().map_err(|e| e.to_string())?;
            to_data(&users)
        }
        "CREATE_USER" => {
            let req: CreateUserRequest = parse_body(body)?;
            let mut user = User::new(req.user_name);
            if let Some(created_at) = req.created_at {
                user.created_at = created_at;
            }
            user.height_cm = req.height_cm;
            user.target_weight = req.target_weight;
            user.notes = req.notes;
            state.db.create_user(&user).map_err(|e| e.to_string())?;
            to_data(&user)
        }
        "DELETE_USER" => {
            let req: DeleteUserRequest = parse_body(body)?;
            state
                .db
                .delete_user(&req.user_name)
                .map_err(|e| e.to_string())?;
            Ok(serde_json::Value::Bool(true))
        }
        "GET_WEIGHTS" => {
            let user_name =
                query_user.ok_or_else(|| "Missing 'user_name' parameter.".to_string())?;
            let weights = state.db.list_weights(user_name).map_err(|e| e.to_string())?;
            to_data(&weights)
        }
        "SAVE_WEIGHT" => {
            let req: SaveWeightRequest = parse_body(body)?;
            let entry = WeightEntry {
                user_name: req.user_name,
                date: normalize_date(&req.date).map_err(|e| e.to_string())?,
                weight_kg: req.weight_kg,
                note: req.note,
            };
            state.db.save_weight(&entry).map_err(|e| e.to_string())?;
            to_data(&entry)
        }
        "DELETE_WEIGHT" => {
            let req: DeleteWeightRequest = parse_body(body)?;
            let date = normalize_date(&req.date).map_err(|e| e.to_string())?;
            state
                .db
                .delete_weight(&req.user_name, date)
                .map_err(|e| e.to_string())?;
            Ok(serde_json::Value::Bool(true))
        }
        other => Err(format!("Invalid Action: {}", other)),
    }
}

/// Parse the raw request body as JSON, treating a missing or malformed
/// body as an empty object
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn to_data<T: Serialize>(value: &T) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}
