//! User identities extracted from authorized requests

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::error::InternalServerError;
use crate::models::UserRole;
use crate::{AppState, Error};

/// The role-tagged identity attached to a request by the auth middleware
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SessionData {
	pub user_id: i32,
	pub role:    UserRole,
}

/// A session for any signed-in user
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.user_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Session {
	pub data: SessionData,
}

/// A session for any administrator
#[derive(Clone, Copy, Debug)]
pub struct AdminSession {
	pub data: SessionData,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let Some(data) = parts.extensions.get::<SessionData>().copied() else {
			return Err(InternalServerError::SessionWithoutAuthError.into());
		};

		Ok(Self { data })
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			parts.extract_with_state::<Session, AppState>(state).await?;

		if !session.data.role.is_admin() {
			return Err(Error::Forbidden);
		}

		Ok(Self { data: session.data })
	}
}
