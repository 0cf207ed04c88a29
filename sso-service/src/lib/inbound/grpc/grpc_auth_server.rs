use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::register;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// gRPC adapter for the auth service.
///
/// Every call is bounded by the shorter of the server's request timeout
/// and the deadline the client sent. When it elapses the operation future
/// is dropped, which rolls back any open transaction.
pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
    request_timeout: Duration,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    fn deadline<T>(&self, request: &Request<T>) -> Duration {
        request
            .metadata()
            .get(GRPC_TIMEOUT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_grpc_timeout)
            .map_or(self.request_timeout, |client| client.min(self.request_timeout))
    }
}

/// Parse a `grpc-timeout` value: at most eight digits followed by a unit
/// (`H`, `M`, `S`, `m`, `u`, `n`).
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if !value.is_ascii() || value.len() < 2 || value.len() > 9 {
        return None;
    }

    let (digits, unit) = value.split_at(value.len() - 1);
    let amount: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 60 * 60)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}

async fn with_deadline<T>(
    operation: &'static str,
    deadline: Duration,
    call: impl Future<Output = Result<T, Status>>,
) -> Result<T, Status> {
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                deadline = ?deadline,
                "Request deadline exceeded"
            );
            Err(Status::deadline_exceeded("request deadline exceeded"))
        }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> Auth for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let deadline = self.deadline(&request);
        let response = with_deadline(
            "register",
            deadline,
            register::register(self.service.as_ref(), request.into_inner()),
        )
        .await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let deadline = self.deadline(&request);
        let response = with_deadline(
            "login",
            deadline,
            login::login(self.service.as_ref(), request.into_inner()),
        )
        .await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let deadline = self.deadline(&request);
        let response = with_deadline(
            "is_admin",
            deadline,
            is_admin::is_admin(self.service.as_ref(), request.into_inner()),
        )
        .await?;
        Ok(Response::new(response))
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::inbound::grpc::handlers::tests::MockTestAuthService;

    #[test]
    fn test_parse_grpc_timeout() {
        assert_eq!(parse_grpc_timeout("2H"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_grpc_timeout("3M"), Some(Duration::from_secs(180)));
        assert_eq!(parse_grpc_timeout("10S"), Some(Duration::from_secs(10)));
        assert_eq!(parse_grpc_timeout("250m"), Some(Duration::from_millis(250)));
        assert_eq!(parse_grpc_timeout("99u"), Some(Duration::from_micros(99)));
        assert_eq!(parse_grpc_timeout("5n"), Some(Duration::from_nanos(5)));
    }

    #[test]
    fn test_parse_grpc_timeout_rejects_malformed_values() {
        assert_eq!(parse_grpc_timeout(""), None);
        assert_eq!(parse_grpc_timeout("m"), None);
        assert_eq!(parse_grpc_timeout("10x"), None);
        assert_eq!(parse_grpc_timeout("123456789S"), None);
        assert_eq!(parse_grpc_timeout("1é"), None);
    }

    #[test]
    fn test_client_deadline_shorter_than_server_timeout_wins() {
        let service = AuthGrpcService::new(
            Arc::new(MockTestAuthService::new()),
            Duration::from_secs(10),
        );

        let mut request = Request::new(IsAdminRequest { user_id: 1 });
        request
            .metadata_mut()
            .insert(GRPC_TIMEOUT_HEADER, "500m".parse().unwrap());
        assert_eq!(service.deadline(&request), Duration::from_millis(500));

        let mut request = Request::new(IsAdminRequest { user_id: 1 });
        request
            .metadata_mut()
            .insert(GRPC_TIMEOUT_HEADER, "1H".parse().unwrap());
        assert_eq!(service.deadline(&request), Duration::from_secs(10));

        let request = Request::new(IsAdminRequest { user_id: 1 });
        assert_eq!(service.deadline(&request), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_slow_operation_exceeds_deadline() {
        let result: Result<(), Status> =
            with_deadline("is_admin", Duration::from_millis(10), async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
    }

    #[tokio::test]
    async fn test_operation_within_deadline_returns_its_result() {
        let mut mock = MockTestAuthService::new();
        mock.expect_check_admin().times(1).returning(|_| Ok(true));
        let service = AuthGrpcService::new(Arc::new(mock), Duration::from_secs(10));

        let response = service
            .is_admin(Request::new(IsAdminRequest { user_id: 1 }))
            .await
            .expect("IsAdmin failed");

        assert!(response.into_inner().is_admin);
    }
}
