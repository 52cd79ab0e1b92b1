//! HTTP API implementation using axum.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use curio_core::{Item, ItemId};
use curio_engine::{BidError, BiddingEngine, OfferOutcome};
use curio_live::{BroadcastHub, ConnectionRegistry, LiveHandler, RegistryHandler};
use curio_market::{ItemStore, MarketError, OfferLedger};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::ws::{self, ConnectionLimiter};

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BiddingEngine>,
    pub handler: Arc<dyn LiveHandler>,
    pub limiter: Arc<ConnectionLimiter>,
}

impl AppState {
    /// Wire up the core components and seed the store.
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let registry = Arc::new(ConnectionRegistry::new());
        let hub = Arc::new(BroadcastHub::new(registry.clone()));
        let store = Arc::new(ItemStore::new());
        let ledger = Arc::new(OfferLedger::new());

        for seed in &config.seed {
            let price = curio_core::Price::parse_positive(&seed.price).map_err(|_| {
                AppError::Config(format!("Invalid seed price for {}: {}", seed.id, seed.price))
            })?;
            store.insert(
                ItemId::from(seed.id.as_str()),
                seed.name.as_str(),
                seed.description.as_str(),
                price,
            )?;
        }
        info!(items = store.len(), "Store seeded");

        Ok(Self {
            engine: Arc::new(BiddingEngine::new(store, ledger, hub)),
            handler: Arc::new(RegistryHandler::new(registry)),
            limiter: Arc::new(ConnectionLimiter::new(config.max_connections)),
        })
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", get(get_item))
        .route("/api/items/{id}/offers", post(submit_offer))
        .route("/ws", get(ws::ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the marketplace server.
pub async fn run_server(config: ServerConfig) -> AppResult<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    info!(%addr, "Starting marketplace server");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// An offer amount may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn into_raw(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    #[serde(default)]
    pub bidder: String,
    /// Absent amounts fail validation in the engine, not in serde.
    #[serde(default)]
    pub amount: Option<RawAmount>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    /// Caller-fixed id; omitted means the store generates one.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: RawAmount,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OfferResponse {
    Accepted {
        #[serde(rename = "newPrice")]
        new_price: f64,
    },
    Rejected {
        #[serde(rename = "currentPrice")]
        current_price: f64,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Serve the index HTML page.
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// List all items.
async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.engine.store().list())
}

/// Read one item.
async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.engine.store().get(&ItemId::from(id.as_str())) {
        Some(item) => Json(item).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("Item not found: {id}")),
    }
}

/// List a new item.
async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Response {
    let price = match curio_core::Price::parse_positive(&req.price.into_raw()) {
        Ok(price) => price,
        Err(_) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "price must be numeric and > 0",
            )
        }
    };

    let store = state.engine.store();
    match req.id {
        Some(id) => match store.insert(
            ItemId::from(id.as_str()),
            req.name.as_str(),
            req.description.as_str(),
            price,
        ) {
            Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
            Err(MarketError::AlreadyExists { id }) => {
                error_response(StatusCode::CONFLICT, format!("Item already exists: {id}"))
            }
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        },
        None => {
            let item = store.create(req.name.as_str(), req.description.as_str(), price);
            (StatusCode::CREATED, Json(item)).into_response()
        }
    }
}

/// Submit an offer against an item.
async fn submit_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<OfferRequest>,
) -> Response {
    let raw_amount = req.amount.map(RawAmount::into_raw).unwrap_or_default();

    match state
        .engine
        .submit(&ItemId::from(id.as_str()), &req.bidder, &raw_amount)
    {
        Ok(OfferOutcome::Accepted { new_price }) => Json(OfferResponse::Accepted {
            new_price: new_price.to_f64(),
        })
        .into_response(),
        Ok(OfferOutcome::Rejected { current_price }) => Json(OfferResponse::Rejected {
            current_price: current_price.to_f64(),
        })
        .into_response(),
        Err(e @ BidError::ItemNotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
        Err(BidError::InvalidOffer(reason)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, reason)
        }
    }
}
