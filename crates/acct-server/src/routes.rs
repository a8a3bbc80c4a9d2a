//! `/accounts` resource handlers.

use std::sync::Arc;
use std::time::Instant;

use acct_core::ACCOUNTS_PATH;
use acct_metrics::{
    OP_CREATE, OP_DELETE, OP_READ, OP_UPDATE, record_error, record_rename, record_request,
};
use acct_store::{Account, AccountError, AccountService, AccountStore, codec};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::ServerError;

type SharedService<S> = Arc<AccountService<S>>;

/// Build the account router.
pub fn account_routes<S: AccountStore + 'static>(service: SharedService<S>) -> Router {
    Router::new()
        .route(ACCOUNTS_PATH, post(create_account::<S>))
        .route(
            &format!("{ACCOUNTS_PATH}/{{login}}"),
            get(read_account::<S>)
                .put(update_account::<S>)
                .delete(delete_account::<S>),
        )
        .with_state(service)
}

async fn create_account<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let account =
        blocking(OP_CREATE, StatusCode::CREATED, move || service.create(&body)).await?;
    let location = format!("{ACCOUNTS_PATH}/{}", account.login());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        document(&account),
    )
        .into_response())
}

async fn read_account<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(login): Path<String>,
) -> Result<Response, ServerError> {
    let account = blocking(OP_READ, StatusCode::OK, move || service.read(&login)).await?;
    Ok(document(&account).into_response())
}

async fn update_account<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(login): Path<String>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let old = login.clone();
    let account =
        blocking(OP_UPDATE, StatusCode::OK, move || service.update(&login, &body)).await?;
    if account.login() != old {
        record_rename();
    }
    Ok(document(&account).into_response())
}

async fn delete_account<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(login): Path<String>,
) -> Result<Response, ServerError> {
    blocking(OP_DELETE, StatusCode::NO_CONTENT, move || service.delete(&login)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn document(account: &Account) -> Json<Value> {
    Json(Value::Object(codec::encode(account)))
}

/// Run a store operation off the async runtime and record its outcome.
async fn blocking<T, F>(op: &'static str, success: StatusCode, f: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AccountError> + Send + 'static,
{
    let start = Instant::now();
    let result = match tokio::task::spawn_blocking(f).await {
        Ok(inner) => inner.map_err(ServerError::from),
        Err(e) => Err(ServerError::from(e)),
    };
    let elapsed = start.elapsed().as_secs_f64();

    match &result {
        Ok(_) => record_request(op, success.as_u16(), elapsed),
        Err(e) => {
            let status = e.status();
            record_request(op, status.as_u16(), elapsed);
            record_error(op, e.error_type());
            if status.is_server_error() {
                error!(op, error = %e, "account operation failed");
            } else {
                debug!(op, status = status.as_u16(), error = %e, "account request rejected");
            }
        }
    }
    result
}
