use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenIssuer;
use config::ConfigError;
use sqlx::PgPool;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::config::Config;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::service::AuthService;
use crate::inbound::grpc::AuthGrpcService;
use crate::outbound::repositories::PostgresStorage;
use crate::proto::auth_server::AuthServer;

pub type PostgresAuthService = AuthService<PostgresStorage, PostgresStorage>;

/// Failures that prevent the service from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid password hashing cost: {0}")]
    PasswordCost(#[from] PasswordError),

    #[error("failed to bind gRPC listener: {0}")]
    Bind(#[from] io::Error),

    #[error("gRPC server failed: {0}")]
    Serve(#[from] tonic::transport::Error),
}

/// Fully wired service bound to its listener, ready to serve.
pub struct Application {
    listener: TcpListener,
    service: Arc<PostgresAuthService>,
    pool: PgPool,
    request_timeout: Duration,
}

impl Application {
    /// Connect to the database, apply migrations and bind the gRPC port.
    ///
    /// # Errors
    /// * `Storage` - Database unreachable or migration failed
    /// * `Config` - Token lifetime is out of range
    /// * `PasswordCost` - Configured hashing cost is invalid
    /// * `Bind` - Port is unavailable
    pub async fn build(config: &Config) -> Result<Self, StartupError> {
        let storage = PostgresStorage::connect(&config.database).await?;
        storage.migrate().await?;

        Self::build_with_storage(config, storage).await
    }

    /// Wire the service on top of an existing storage pool.
    pub async fn build_with_storage(
        config: &Config,
        storage: PostgresStorage,
    ) -> Result<Self, StartupError> {
        let password_hasher = PasswordHasher::with_cost(config.password)?;
        let token_issuer = TokenIssuer::new(config.token.ttl()?, config.token.signing_mode);

        let pool = storage.pool().clone();
        let storage = Arc::new(storage);
        let service = Arc::new(AuthService::new(
            Arc::clone(&storage),
            storage,
            password_hasher,
            token_issuer,
        )?);

        let address = SocketAddr::from(([0, 0, 0, 0], config.server.grpc_port));
        let listener = TcpListener::bind(address).await?;

        Ok(Self {
            listener,
            service,
            pool,
            request_timeout: config.server.request_timeout(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve gRPC requests until `shutdown` resolves, then close the pool.
    ///
    /// # Errors
    /// * `Serve` - Transport failure
    pub async fn run_until_stopped(
        self,
        shutdown: impl Future<Output = ()> + Send,
    ) -> Result<(), StartupError> {
        let address = self.local_addr()?;
        let grpc_service = AuthGrpcService::new(self.service, self.request_timeout);

        tracing::info!(
            address = %address,
            port = address.port(),
            protocol = "grpc",
            "gRpc server listening"
        );

        Server::builder()
            .add_service(AuthServer::new(grpc_service))
            .serve_with_incoming_shutdown(TcpListenerStream::new(self.listener), shutdown)
            .await?;

        self.pool.close().await;
        tracing::info!("gRpc server stopped");

        Ok(())
    }
}
