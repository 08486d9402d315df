use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::reply::Reply;
use warp::{Filter, Rejection};

use dealer_engine::deck::Seed;

use crate::dealer::DeckManager;
use crate::handlers;
use crate::middleware;
use crate::spec::{ApiSpec, SpecError};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    seed: Option<Seed>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            seed: None,
        }
    }

    /// Sets the shuffle seed. Read from configuration once per process; the
    /// deck built from it lives for the server's whole lifetime.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("API description error: {0}")]
    SpecError(#[from] SpecError),
}

/// Shared components handed to every request handler: the one deck manager
/// and the parsed API description.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    deck: Arc<DeckManager>,
    spec: Arc<ApiSpec>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let spec = Arc::new(ApiSpec::load()?);
        let deck = Arc::new(DeckManager::new(config.seed().cloned()));
        Ok(Self { config, deck, spec })
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests()).expect("test context")
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn deck(&self) -> Arc<DeckManager> {
        Arc::clone(&self.deck)
    }

    pub fn spec(&self) -> Arc<ApiSpec> {
        Arc::clone(&self.spec)
    }
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// The whole route set: gated dealing endpoints, gate-exempt spec
    /// endpoints, request logging, and rejection recovery.
    pub fn routes(
        context: &AppContext,
    ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let api = Self::dealer_routes(context)
            .or(Self::spec_routes(context))
            .unify();

        middleware::with_request_logging(api).recover(middleware::handle_rejection)
    }

    fn dealer_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let deck = context.deck();

        handlers::deal_hand(Arc::clone(&deck))
            .or(handlers::deal_hands(deck))
            .unify()
            .boxed()
    }

    fn spec_routes(context: &AppContext) -> BoxedFilter<(warp::reply::Response,)> {
        let spec = context.spec();

        handlers::openapi_yaml(Arc::clone(&spec))
            .or(handlers::openapi_json(spec))
            .unify()
            .boxed()
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let config = context.config().clone();
        let bind_addr = Self::bind_addr(&config)?;

        // Fail early with a plain io::Error when the port is taken.
        let preflight = if bind_addr.port() != 0 {
            Some(std::net::TcpListener::bind(bind_addr).map_err(ServerError::BindError)?)
        } else {
            None
        };
        drop(preflight);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(%addr, "web server listening");

        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(source) = err.source() {
            if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
                let recreated = std::io::Error::new(io_err.kind(), io_err.to_string());
                return ServerError::BindError(recreated);
            }
        }

        ServerError::ConfigError(err.to_string())
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
