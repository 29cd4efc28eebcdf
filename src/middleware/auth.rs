//! Middleware to authorize users and store their identity on the request

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::RequestExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use axum_extra::extract::PrivateCookieJar;
use tower::{Layer, Service};

use crate::AppState;
use crate::error::{Error, TokenError};
use crate::models::User;
use crate::session::SessionData;

/// Middleware layer that guarantees a request carries a valid access token
/// for an existing user
///
/// The resolved identity is stored as a [`SessionData`] extension,
/// controllers that need it ask for a [`Session`](crate::Session) or
/// [`AdminSession`](crate::AdminSession) in their arguments
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let jar = req
				.extract_parts_with_state::<PrivateCookieJar, _>(&state)
				.await
				.unwrap();

			let Some(access_token) = jar.get(&state.config.access_token_name)
			else {
				info!("got request without valid access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			// A revoked cookie decrypts to an empty value
			let Ok(user_id) = access_token.value().parse::<i32>() else {
				info!("got request with malformed access token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let conn = match state.database_pool.get().await {
				Ok(c) => c,
				Err(e) => {
					return Ok(Error::from(e).into_response());
				},
			};

			let user = match User::get(user_id, &conn).await {
				Ok(u) => u,
				Err(Error::NotFound(_)) => {
					warn!("got access token for unknown user {user_id}");

					return Ok(Error::from(TokenError::StaleAccessToken)
						.into_response());
				},
				Err(e) => return Ok(e.into_response()),
			};

			let data = SessionData { user_id: user.id, role: user.role };
			req.extensions_mut().insert(data);

			inner.call(req).await
		})
	}
}
