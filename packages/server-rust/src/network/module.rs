//! Network module with deferred startup lifecycle.
//!
//! `new()` wires the registry and controllers, `start()` binds the TCP
//! listener, and `serve()` accepts connections until the shutdown future
//! resolves.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use aspectkit_core::{Dispatcher, ExecutionLogger};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::config::NetworkConfig;
use super::handlers::{
    combined_info_handler, health_handler, info_by_path_handler, info_by_query_handler,
    liveness_handler, readiness_handler, send_sms_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;
use crate::config::ServerConfig;
use crate::service::{build_registry, CustomerController, SmsController};

/// Owns the HTTP server lifecycle.
///
/// 1. `new()` -- builds the frozen interceptor registry and shared state
/// 2. `start()` -- binds the listener
/// 3. `serve()` -- serves until shutdown is signalled
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    state: AppState,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    ///
    /// Timing records from `@LogExecutionTime` operations go to `logger`.
    #[must_use]
    pub fn new(config: &ServerConfig, logger: Arc<dyn ExecutionLogger>) -> Self {
        let state = AppState {
            dispatcher: Dispatcher::new(build_registry(logger)),
            customers: Arc::new(CustomerController::new(config.default_customer_name.clone())),
            sms: SmsController,
            shutdown: Arc::new(ShutdownController::new()),
            start_time: Instant::now(),
        };
        Self {
            config: config.network.clone(),
            listener: None,
            state,
        }
    }

    /// Returns a shared reference to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.state.shutdown)
    }

    /// Assembles the router.
    ///
    /// Routes:
    /// - `GET /customer/info/{nic}`
    /// - `GET /customer/info?nic=&name=`
    /// - `GET /customer/allInfo/{nic}?name=`
    /// - `POST /sms/send/{mobile}`
    /// - `GET /health`, `/health/live`, `/health/ready`
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/customer/info/{nic}", get(info_by_path_handler))
            .route("/customer/info", get(info_by_query_handler))
            .route("/customer/allInfo/{nic}", get(combined_info_handler))
            .route("/sms/send/{mobile}", post(send_sms_handler))
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .layer(build_http_layers(&self.config))
            .with_state(self.state.clone())
    }

    /// Binds the TCP listener and returns the bound port (useful with port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves until `shutdown` resolves, then lets in-flight requests finish.
    ///
    /// Health moves to Ready on entry, Draining when `shutdown` fires, and
    /// Stopped once the server loop exits.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;
        let router = self.build_router();
        let controller = self.shutdown_controller();

        controller.set_ready();
        info!("Serving HTTP connections");

        let draining = Arc::clone(&controller);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown requested, draining in-flight requests");
                draining.trigger_shutdown();
            })
            .await?;

        controller.set_stopped();
        info!("Server stopped");
        Ok(())
    }
}
