use std::path::PathBuf;

use diesel::prelude::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{User, UserRole};
use crate::{DbConn, Error};

pub struct Seeder<'c> {
	connection: &'c DbConn,
}

impl<'c> Seeder<'c> {
	#[must_use]
	pub fn new(connection: &'c DbConn) -> Self { Self { connection } }

	/// Read a file into a series of deserializable items
	///
	/// # Panics
	/// Panics if reading or deserializing the file fails
	fn read_file_records<T, I>(filename: &str) -> I
	where
		T: DeserializeOwned,
		I: IntoIterator<Item = T> + DeserializeOwned,
	{
		let path = std::env::var("CARGO_MANIFEST_DIR")
			.map(PathBuf::from)
			.unwrap_or_default()
			.join(filename);

		let s = std::fs::read_to_string(path)
			.unwrap_or_else(|_| panic!("COULD NOT READ SEED FILE {filename}"));

		serde_json::from_str(&s)
			.unwrap_or_else(|_| panic!("COULD NOT MAP SEED FILE {filename}"))
	}

	/// Load a file and populate the database with it
	///
	/// # Panics
	/// Panics if reading the file or interacting with the database fails
	pub async fn populate<T, F>(&self, filename: &str, loader: F) -> &Self
	where
		T: DeserializeOwned + std::fmt::Debug,
		F: AsyncFnOnce(&DbConn, Vec<T>) -> Result<(), Error>,
	{
		let records = Self::read_file_records(filename);

		loader(self.connection, records).await.unwrap_or_else(|e| {
			panic!("COULD NOT LOAD RECORDS FOR {filename}: {e:?}")
		});

		info!("seeded database from {filename}");

		self
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedUser {
	pub username: String,
	pub email:    String,
	pub password: String,
	#[serde(default)]
	pub role:     UserRole,
}

#[derive(AsChangeset, Clone, Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
struct InsertableSeedUser {
	username:      String,
	email:         String,
	password_hash: String,
	role:          UserRole,
}

impl SeedUser {
	/// Upsert this [`SeedUser`] by email
	///
	/// Provisioning the same email twice updates the existing row in place
	/// instead of inserting a second one
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let hash = User::hash_password(&self.password)?;
		let insertable = InsertableSeedUser {
			username:      self.username,
			email:         self.email,
			password_hash: hash,
			role:          self.role,
		};

		conn.interact(|conn| {
			use crate::schema::users::dsl::*;

			diesel::insert_into(users)
				.values(insertable.clone())
				.on_conflict(email)
				.do_update()
				.set(insertable)
				.execute(conn)
		})
		.await??;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedRoom {
	pub name:     String,
	pub capacity: i32,
	#[serde(default)]
	pub location: String,
}

#[derive(AsChangeset, Clone, Debug, Insertable)]
#[diesel(table_name = crate::schema::rooms)]
struct InsertableSeedRoom {
	name:     String,
	capacity: i32,
	location: String,
}

impl SeedRoom {
	/// Upsert this [`SeedRoom`] by name
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let insertable = InsertableSeedRoom {
			name:     self.name,
			capacity: self.capacity,
			location: self.location,
		};

		conn.interact(|conn| {
			use crate::schema::rooms::dsl::*;

			diesel::insert_into(rooms)
				.values(insertable.clone())
				.on_conflict(name)
				.do_update()
				.set(insertable)
				.execute(conn)
		})
		.await??;

		Ok(())
	}
}
