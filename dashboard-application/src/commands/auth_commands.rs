use tracing::{info, warn};

use dashboard_domain::{ClientError, RegisterRequest, User, UserSession, DEFAULT_ROLE};

use crate::{AppError, SessionController};

pub async fn login(
    session: &SessionController,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return session.fail(ClientError::validation("please fill in all fields").into());
    }

    let response = match session.api.login(email, password).await {
        Ok(response) => response,
        Err(err) => return session.fail(err.into()),
    };

    let user_session = UserSession::from(response);
    if let Err(err) = session.store.save_session(&user_session).await {
        return session.fail(err.into());
    }

    let user = user_session.user.clone();
    session.state.write().await.user = Some(user_session);
    info!(email = %user.email, role = %user.role, "logged in");
    session.notices.success("Logged in successfully");
    Ok(user)
}

pub async fn register(
    session: &SessionController,
    name: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> Result<(), AppError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return session.fail(ClientError::validation("please fill in all fields").into());
    }

    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: role
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ROLE)
            .to_string(),
    };

    match session.api.register(&request).await {
        Ok(_) => {
            info!(email = %request.email, "registered");
            session
                .notices
                .success("Registration successful. You can now log in");
            Ok(())
        }
        Err(err) => session.fail(err.into()),
    }
}

pub async fn logout(session: &SessionController) -> Result<(), AppError> {
    if let Err(err) = session.store.clear_session().await {
        return session.fail(err.into());
    }
    session.state.write().await.user = None;
    info!("session cleared");
    session.notices.info("Logged out");
    Ok(())
}

/// Loads a previously persisted session, if any. Storage problems are logged
/// and treated as "not logged in".
pub async fn restore_session(session: &SessionController) -> Option<User> {
    match session.store.load_session().await {
        Ok(Some(stored)) => {
            let user = stored.user.clone();
            session.state.write().await.user = Some(stored);
            Some(user)
        }
        Ok(None) => None,
        Err(err) => {
            warn!("failed to load stored session: {}", err);
            None
        }
    }
}

pub async fn current_user(session: &SessionController) -> Option<User> {
    session.state.read().await.current_user().cloned()
}
