use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};

use crate::schema::users;
use crate::{DbConn, Error};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum UserRole {
	#[default]
	Student,
	#[serde(rename = "Campus Administrator")]
	CampusAdministrator,
	#[serde(rename = "Classroom President")]
	ClassroomPresident,
}

impl UserRole {
	/// Whether this role may manage rooms and other peoples' reservations
	#[must_use]
	pub fn is_admin(self) -> bool { matches!(self, Self::CampusAdministrator) }
}

/// A single user account
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id:       i32,
	pub username: String,
	pub email:    String,
	#[serde(skip)]
	pub password_hash: String,
	pub role:     UserRole,
}

impl TryFrom<&User> for Mailbox {
	type Error = Error;

	fn try_from(value: &User) -> Result<Mailbox, Error> {
		Ok(Mailbox::new(Some(value.username.clone()), value.email.parse()?))
	}
}

impl User {
	/// Hash a plaintext password for storage
	///
	/// # Errors
	/// Fails if the bcrypt hash cannot be computed
	pub fn hash_password(password: &str) -> Result<String, Error> {
		Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
	}

	/// Check a plaintext password against a stored bcrypt hash
	///
	/// # Errors
	/// Fails if the stored hash is malformed
	pub fn verify_password(
		password: &str,
		password_hash: &str,
	) -> Result<bool, Error> {
		Ok(bcrypt::verify(password, password_hash)?)
	}

	/// Get a [`User`] given its id
	#[instrument(skip(conn))]
	pub async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let user = conn
			.interact(move |conn| {
				use self::users::dsl::*;

				users.find(query_id).select(User::as_select()).get_result(conn)
			})
			.await??;

		Ok(user)
	}

	/// Get a [`User`] given its email, if one exists
	#[instrument(skip(conn))]
	pub async fn get_by_email(
		query_email: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let user = conn
			.interact(|conn| {
				use self::users::dsl::*;

				users
					.filter(email.eq(query_email))
					.select(User::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(user)
	}
}
