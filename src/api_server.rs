//! REST API server for the classification endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{ClassifierError, ErrorCode, Result};
use crate::facts::FactSource;
use crate::response::{ClassifyReply, NumberClassifier};

pub const CLASSIFY_ROUTE: &str = "/api/classify-number";

/// API server for number classification
pub struct ClassifierApiServer {
    classifier: NumberClassifier,
    addr: SocketAddr,
}

impl ClassifierApiServer {
    /// Create new API server
    pub fn new(classifier: NumberClassifier, addr: SocketAddr) -> Self {
        Self { classifier, addr }
    }

    /// Create an API server for `config` backed by `facts`
    pub fn from_config(config: &ServerConfig, facts: Arc<dyn FactSource>) -> Self {
        Self::new(
            NumberClassifier::from_config(config, facts),
            config.bind_address(),
        )
    }

    /// Address `start` binds to
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the API server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let addr = self.addr;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            ClassifierError::server_with_code(
                ErrorCode::SERVER_BIND_FAILED,
                format!("Failed to bind {addr}"),
            )
            .with_source(e)
        })?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!("Server running on {}", addr);
        }

        let app = self.build_router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                ClassifierError::server_with_code(ErrorCode::SERVER_GENERIC, "Server error")
                    .with_source(e)
            })?;

        info!("Server stopped");
        Ok(())
    }

    /// Build API router
    pub fn build_router(self) -> Router {
        let shared_state = Arc::new(ApiState {
            classifier: self.classifier,
        });

        Router::new()
            .route(CLASSIFY_ROUTE, get(classify_number))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(shared_state)
    }
}

/// Shared API state
#[derive(Clone)]
struct ApiState {
    classifier: NumberClassifier,
}

const NUMBER_PARAM: &str = "number";

async fn classify_number(
    State(state): State<Arc<ApiState>>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ClassifyReply {
    // an unreadable query string is answered like a missing parameter
    let raw = match query {
        Ok(Query(params)) => first_number_param(params),
        Err(rejection) => {
            debug!("Unreadable query string: {}", rejection);
            None
        }
    };

    state.classifier.classify_query(raw.as_deref()).await
}

/// The first `number` value wins when the parameter is repeated
fn first_number_param(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(key, _)| key == NUMBER_PARAM)
        .map(|(_, value)| value)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
