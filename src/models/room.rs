use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{reservations, rooms};
use crate::{DbConn, Error};

/// A single reservable room
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(Pg))]
pub struct Room {
	pub id:        i32,
	pub name:      String,
	pub capacity:  i32,
	pub location:  String,
	pub is_active: bool,
}

impl Room {
	/// Get a [`Room`] given its id
	#[instrument(skip(conn))]
	pub async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let room = conn
			.interact(move |conn| {
				use self::rooms::dsl::*;

				rooms.find(query_id).select(Room::as_select()).get_result(conn)
			})
			.await??;

		Ok(room)
	}

	/// Get a list of all [`Room`]s
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let room_list = conn
			.interact(|conn| {
				use self::rooms::dsl::*;

				rooms.select(Room::as_select()).order(id).load(conn)
			})
			.await??;

		Ok(room_list)
	}

	/// Delete a [`Room`] and every reservation that references it
	///
	/// Both deletes run in a single transaction, a failure in either leaves
	/// the room and its reservations untouched
	#[instrument(skip(conn))]
	pub async fn delete_with_reservations(
		r_id: i32,
		conn: &DbConn,
	) -> Result<usize, Error> {
		let removed = conn
			.interact(move |conn| {
				conn.transaction(|conn| {
					let removed = diesel::delete(
						reservations::table
							.filter(reservations::room_id.eq(r_id)),
					)
					.execute(conn)?;

					let room_rows =
						diesel::delete(rooms::table.find(r_id)).execute(conn)?;

					if room_rows == 0 {
						return Err(diesel::result::Error::NotFound);
					}

					Ok::<usize, diesel::result::Error>(removed)
				})
			})
			.await??;

		info!("deleted room {r_id} and {removed} of its reservations");

		Ok(removed)
	}
}

/// [`Room`] data required for creation
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(Pg))]
pub struct NewRoom {
	pub name:     String,
	pub capacity: i32,
	pub location: String,
}

impl NewRoom {
	/// Insert this [`NewRoom`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Room, Error> {
		let room = conn
			.interact(|conn| {
				use self::rooms::dsl::*;

				diesel::insert_into(rooms)
					.values(self)
					.returning(Room::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created room {} '{}'", room.id, room.name);

		Ok(room)
	}
}
