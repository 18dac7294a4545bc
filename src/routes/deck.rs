use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{DismissResponse, ErrorResponse, GestureRequest, HealthResponse, MatchResponse, SwipeRequest};
use crate::services::{SessionError, SessionHandle};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
}

/// Configure all deck-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/deck", web::get().to(get_deck))
        .route("/cards/{card_id}/gesture/start", web::post().to(gesture_start))
        .route("/cards/{card_id}/gesture/move", web::post().to(gesture_move))
        .route("/cards/{card_id}/gesture/end", web::post().to(gesture_end))
        .route("/swipe", web::post().to(swipe))
        .route("/match", web::get().to(current_match))
        .route("/match/dismiss", web::post().to(dismiss_match));
}

fn session_unavailable(e: SessionError) -> HttpResponse {
    tracing::error!("Deck session unavailable: {}", e);
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "session_unavailable".to_string(),
        message: e.to_string(),
        status_code: 503,
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = match state.session.deck().await {
        Ok(_) => "healthy",
        Err(_) => "degraded",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Renderable deck
///
/// GET /api/v1/deck
async fn get_deck(state: web::Data<AppState>) -> HttpResponse {
    match state.session.deck().await {
        Ok(deck) => HttpResponse::Ok().json(deck),
        Err(e) => session_unavailable(e),
    }
}

/// Pointer-down / touch-start on a card
///
/// POST /api/v1/cards/{card_id}/gesture/start
///
/// Request body:
/// ```json
/// { "x": 187.5 }
/// ```
async fn gesture_start(
    state: web::Data<AppState>,
    card_id: web::Path<String>,
    req: web::Json<GestureRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.session.gesture_start(&card_id, req.x).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => session_unavailable(e),
    }
}

/// Pointer/touch move on a card
///
/// POST /api/v1/cards/{card_id}/gesture/move
async fn gesture_move(
    state: web::Data<AppState>,
    card_id: web::Path<String>,
    req: web::Json<GestureRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.session.gesture_move(&card_id, req.x).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => session_unavailable(e),
    }
}

/// Pointer-up, touch-end or pointer-leave on a card
///
/// POST /api/v1/cards/{card_id}/gesture/end
async fn gesture_end(state: web::Data<AppState>, card_id: web::Path<String>) -> HttpResponse {
    match state.session.gesture_end(&card_id).await {
        Ok(response) => {
            if let Some(decision) = response.decision {
                tracing::info!("Card {} swiped: {}", card_id, decision);
            }
            HttpResponse::Ok().json(response)
        }
        Err(e) => session_unavailable(e),
    }
}

/// Like / pass buttons
///
/// POST /api/v1/swipe
///
/// Request body:
/// ```json
/// { "direction": "accept" }
/// ```
async fn swipe(state: web::Data<AppState>, req: web::Json<SwipeRequest>) -> HttpResponse {
    match state.session.swipe(req.direction).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => session_unavailable(e),
    }
}

/// Currently published match
///
/// GET /api/v1/match
async fn current_match(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(MatchResponse {
        current: state.session.current_match(),
    })
}

/// Close the match dialog
///
/// POST /api/v1/match/dismiss
async fn dismiss_match(state: web::Data<AppState>) -> HttpResponse {
    match state.session.dismiss_match().await {
        Ok(dismissed) => HttpResponse::Ok().json(DismissResponse { dismissed }),
        Err(e) => session_unavailable(e),
    }
}
