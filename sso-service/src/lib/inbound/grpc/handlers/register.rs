use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let command = try_into_command(request)?;

    let user_id = service.register(command).await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}

fn try_into_command(request: RegisterRequest) -> Result<RegisterCommand, AuthError> {
    let email = EmailAddress::new(request.email)?;
    let password = Password::new(request.password)?;
    Ok(RegisterCommand::new(email, password))
}
