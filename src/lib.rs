#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Object, Pool};

pub mod config;
pub mod controllers;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod schemas;
pub mod seeder;
pub mod session;

pub type DbPool = Pool;
pub type DbConn = Object;

pub use config::Config;
pub use error::{
	DeleteReservationError,
	Error,
	InternalServerError,
	LoginError,
	TokenError,
};
pub use seeder::{SeedRoom, SeedUser, Seeder};
pub use session::{AdminSession, Session, SessionData};

use crate::mailer::Mailer;

/// Shared state for the axum app
#[derive(Clone, FromRef)]
pub struct AppState {
	pub config:         Config,
	pub database_pool:  DbPool,
	pub cookie_jar_key: Key,
	pub mailer:         Mailer,
}
