use serde::{Deserialize, Serialize};

use crate::models::{User, UserRole};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
	pub email:    String,
	pub password: String,
}

/// The role-tagged identity returned by a successful login
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
	pub id:       i32,
	pub username: String,
	pub email:    String,
	pub role:     UserRole,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			id:       user.id,
			username: user.username,
			email:    user.email,
			role:     user.role,
		}
	}
}
