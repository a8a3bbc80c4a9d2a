//! Account server library.
//!
//! Serves the account resource over HTTP:
//!
//! | Method   | Path               | Success                          |
//! |----------|--------------------|----------------------------------|
//! | `POST`   | `/accounts`        | `201` + `Location`, stored record |
//! | `GET`    | `/accounts/{login}`| `200`, stored record             |
//! | `PUT`    | `/accounts/{login}`| `200`, updated record            |
//! | `DELETE` | `/accounts/{login}`| `204`                            |
//!
//! Failures answer `{"error": "<message>"}`; see [`ServerError::status`].

pub mod cli;
mod error;
mod routes;
mod server;

pub use cli::ServerArgs;
pub use error::ServerError;
pub use routes::account_routes;
pub use server::{DEFAULT_SHUTDOWN_TIMEOUT, run_with_shutdown, serve};
pub use tokio_util::sync::CancellationToken;
