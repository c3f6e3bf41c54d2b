//! Servidor web Axum com WebSocket para visualização da desambiguação em tempo real

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use wsd_core::{
    corpus::demo_cases,
    DemoEmbedder, DisambiguationConfig, KnownHeadword, PipelineEvent, WsdPipeline,
};

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: WsdPipeline<DemoEmbedder>,
}

#[derive(Deserialize)]
struct DisambiguateRequest {
    lemma: String,
    usage: String,
    /// Verbetes candidatos explícitos; se ausentes, o caso de demonstração é
    /// resolvido por `case_index` ou pelo lema.
    #[serde(default)]
    known_headwords: Option<Vec<KnownHeadword>>,
    #[serde(default)]
    case_index: Option<usize>,
    #[serde(default)]
    config: Option<DisambiguationConfig>,
}

/// Mensagem WebSocket recebida do cliente (mesmo formato do POST)
#[derive(Deserialize)]
struct WsRequest {
    lemma: String,
    usage: String,
    #[serde(default)]
    known_headwords: Option<Vec<KnownHeadword>>,
    #[serde(default)]
    case_index: Option<usize>,
    #[serde(default)]
    config: Option<DisambiguationConfig>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let pipeline = WsdPipeline::new(DemoEmbedder::default());
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/disambiguate", post(disambiguate_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-cases", get(demo_cases_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("🚀 Servidor WSD iniciado em http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Resolve os verbetes candidatos: explícitos, por índice de caso ou por lema
fn resolve_headwords(
    explicit: Option<Vec<KnownHeadword>>,
    case_index: Option<usize>,
    lemma: &str,
) -> Option<Vec<KnownHeadword>> {
    if let Some(headwords) = explicit {
        if !headwords.is_empty() {
            return Some(headwords);
        }
    }

    let cases = demo_cases();

    if let Some(index) = case_index {
        return cases.get(index).map(|c| c.known_headwords.clone());
    }

    cases
        .iter()
        .find(|c| c.lemma == lemma)
        .map(|c| c.known_headwords.clone())
}

/// Desambiguação via HTTP POST (sem streaming)
async fn disambiguate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DisambiguateRequest>,
) -> impl IntoResponse {
    if req.usage.trim().is_empty() || req.lemma.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Lema e uso não podem ser vazios"})),
        )
            .into_response();
    }

    let Some(headwords) = resolve_headwords(req.known_headwords, req.case_index, &req.lemma)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Nenhum verbete candidato: envie known_headwords ou use um lema de demonstração"
            })),
        )
            .into_response();
    };

    let config = req.config.unwrap_or(state.pipeline.config);
    let pipeline = WsdPipeline::with_config(state.pipeline.embedder, config);

    match pipeline.disambiguate(&req.lemma, &req.usage, &headwords) {
        Ok(result) => Json(result).into_response(),
        Err(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": error.to_string()})),
        )
            .into_response(),
    }
}

/// Retorna os casos de demonstração completos
async fn demo_cases_handler() -> impl IntoResponse {
    Json(demo_cases())
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe a consulta, executa o pipeline e envia os
/// eventos passo-a-passo para o cliente
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let Ok(req) = serde_json::from_str::<WsRequest>(&text) else {
                    continue;
                };

                if req.usage.trim().is_empty() || req.lemma.trim().is_empty() {
                    continue;
                }

                let Some(headwords) =
                    resolve_headwords(req.known_headwords, req.case_index, &req.lemma)
                else {
                    continue;
                };

                info!(
                    "Desambiguando via WebSocket: lema '{}', {} verbetes",
                    req.lemma,
                    headwords.len()
                );

                let config = req.config.unwrap_or(state.pipeline.config);
                let embedder = state.pipeline.embedder;
                let lemma = req.lemma.clone();
                let usage = req.usage.clone();

                // O pipeline é síncrono: roda em spawn_blocking para não
                // bloquear o runtime, acumulando os eventos num canal std
                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();

                let handle = tokio::task::spawn_blocking(move || {
                    let pipeline = WsdPipeline::with_config(embedder, config);
                    pipeline.disambiguate_streaming(&lemma, &usage, &headwords, tx_std);
                });

                handle.await.ok();

                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
