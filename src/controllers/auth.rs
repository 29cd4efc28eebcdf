//! Controllers for authentication

use axum::Json;
use axum::extract::State;
use axum::response::NoContent;
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::models::User;
use crate::schemas::auth::{LoginRequest, UserResponse};
use crate::{Config, DbPool, Error, LoginError, Session};

#[instrument(skip_all)]
pub(crate) async fn login(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(login_data): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<UserResponse>), Error> {
	let conn = pool.get().await?;
	let user = User::get_by_email(login_data.email.clone(), &conn).await?;

	let Some(user) = user else {
		return Err(LoginError::UnknownEmail(login_data.email).into());
	};

	if !User::verify_password(&login_data.password, &user.password_hash)? {
		return Err(LoginError::InvalidPassword.into());
	}

	let secure = config.production;
	let access_token =
		Cookie::build((config.access_token_name, user.id.to_string()))
			.domain("")
			.http_only(true)
			.max_age(config.access_token_lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure);

	let jar = jar.add(access_token);

	info!("logged in user {} with role {:?}", user.id, user.role);

	Ok((jar, Json(user.into())))
}

#[instrument(skip_all)]
pub(crate) async fn logout(
	State(config): State<Config>,
	jar: PrivateCookieJar,
	session: Session,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	let secure = config.production;

	let revoked_access_token = Cookie::build((config.access_token_name, ""))
		.domain("")
		.http_only(true)
		.max_age(time::Duration::hours(-1))
		.path("/")
		.same_site(SameSite::Lax)
		.secure(secure);

	let jar = jar.add(revoked_access_token);

	info!("logged out user {}", session.data.user_id);

	Ok((jar, NoContent))
}
