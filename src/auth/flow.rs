use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use crate::auth::google::{TokenVerifier, VerifiedIdentity};
use crate::config::RegistrationPolicy;
use crate::error::ApiError;
use crate::model::employee::{Employee, NewEmployee};
use crate::models::{AuthResponse, UserInfo};
use crate::store::EmployeeStore;

const TOKEN_PREFIX: &str = "demo-token";

/// Opaque display token. Carries no claims and is never checked by the server.
fn issue_token(employee_id: Option<u64>) -> String {
    let now = Utc::now().timestamp_millis();
    match employee_id {
        Some(id) => format!("{TOKEN_PREFIX}-{id}-{now}"),
        None => format!("{TOKEN_PREFIX}-guest-{now}"),
    }
}

/// Profile name for a new employee: the token's name, else the email local part.
fn display_name(identity: &VerifiedIdentity) -> String {
    identity.name.clone().unwrap_or_else(|| {
        identity
            .email
            .split('@')
            .next()
            .unwrap_or(&identity.email)
            .to_string()
    })
}

fn registered(employee: Employee) -> AuthResponse {
    let token = issue_token(Some(employee.id));
    AuthResponse {
        user: UserInfo {
            id: Some(employee.id),
            name: employee.name,
            email: employee.email,
        },
        token,
        registered: true,
    }
}

/// Google login: validate the token, then attach, create or reject the employee
/// according to the configured [`RegistrationPolicy`].
pub struct AuthFlow {
    employees: Arc<dyn EmployeeStore>,
    verifier: Arc<dyn TokenVerifier>,
    policy: RegistrationPolicy,
}

impl AuthFlow {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        verifier: Arc<dyn TokenVerifier>,
        policy: RegistrationPolicy,
    ) -> Self {
        Self {
            employees,
            verifier,
            policy,
        }
    }

    #[instrument(name = "google_login", skip_all, fields(policy = %self.policy))]
    pub async fn login_with_google(&self, id_token: &str) -> Result<AuthResponse, ApiError> {
        if id_token.trim().is_empty() {
            return Err(ApiError::MalformedRequest("Missing idToken".to_string()));
        }

        let identity = self.verifier.validate(id_token).await?;

        if let Some(employee) = self.employees.find_by_email(&identity.email).await? {
            info!(employee_id = employee.id, "Google login matched employee");
            return Ok(registered(employee));
        }

        match self.policy {
            RegistrationPolicy::Strict => {
                info!("Google-authenticated email is not a registered employee");
                Err(ApiError::AuthenticationFailure(
                    "Employee not registered".to_string(),
                ))
            }
            RegistrationPolicy::AutoRegister => {
                let employee = self
                    .employees
                    .insert_or_get(NewEmployee {
                        name: display_name(&identity),
                        email: identity.email,
                    })
                    .await?;
                info!(employee_id = employee.id, "Employee registered from Google login");
                Ok(registered(employee))
            }
            RegistrationPolicy::Guest => {
                info!("Google-authenticated email not in directory, answering as guest");
                Ok(AuthResponse {
                    user: UserInfo {
                        id: None,
                        name: display_name(&identity),
                        email: identity.email,
                    },
                    token: issue_token(None),
                    registered: false,
                })
            }
        }
    }
}
