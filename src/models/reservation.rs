use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::models::Room;
use crate::schema::{reservations, rooms};
use crate::{DbConn, Error};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReservationStatus"]
pub enum ReservationStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
	Cancelled,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReservationType"]
pub enum ReservationType {
	#[default]
	Academic,
	Event,
	#[serde(rename = "Formal/Formal Event")]
	FormalEvent,
	#[serde(rename = "Org Meeting")]
	OrgMeeting,
	Other,
}

/// Status predicate for listing reservations, `All` applies no predicate
#[derive(
	Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
pub enum StatusFilter {
	#[default]
	All,
	Pending,
	Approved,
	Rejected,
	Cancelled,
}

impl StatusFilter {
	#[must_use]
	pub fn as_status(self) -> Option<ReservationStatus> {
		match self {
			Self::All => None,
			Self::Pending => Some(ReservationStatus::Pending),
			Self::Approved => Some(ReservationStatus::Approved),
			Self::Rejected => Some(ReservationStatus::Rejected),
			Self::Cancelled => Some(ReservationStatus::Cancelled),
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
	#[serde(default)]
	pub status: StatusFilter,
	pub search: Option<String>,
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservation {
	pub id:                   i32,
	pub user_id:              i32,
	pub room_id:              i32,
	pub full_name:            String,
	pub course_section:       String,
	pub reservation_type:     ReservationType,
	pub start_time:           NaiveDateTime,
	pub end_time:             NaiveDateTime,
	pub activity_description: String,
	pub status:               ReservationStatus,
	pub created_at:           NaiveDateTime,
}

impl PrimitiveReservation {
	/// Get a [`PrimitiveReservation`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservations::dsl::*;

				reservations
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(reservation)
	}

	/// Overwrite the status of the reservation with the given id
	///
	/// No legality check is made on the previous status, any status can be
	/// rewritten to any other
	#[instrument(skip(conn))]
	pub async fn set_status(
		r_id: i32,
		new_status: ReservationStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservations::dsl::*;

				diesel::update(reservations.find(r_id))
					.set(status.eq(new_status))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("set status of reservation {r_id} to {new_status:?}");

		Ok(reservation)
	}

	/// Delete a reservation given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::reservations::dsl::*;

			diesel::delete(reservations.find(r_id)).execute(conn)
		})
		.await??;

		info!("deleted reservation with id {r_id}");

		Ok(())
	}
}

/// A single reservation joined with the room it reserves
#[derive(Clone, Debug, Serialize)]
pub struct Reservation {
	pub reservation: PrimitiveReservation,
	pub room:        Room,
}

impl Reservation {
	/// Get a [`Reservation`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let (reservation, room) = conn
			.interact(move |conn| {
				reservations::table
					.inner_join(rooms::table)
					.filter(reservations::id.eq(r_id))
					.select((
						PrimitiveReservation::as_select(),
						Room::as_select(),
					))
					.get_result(conn)
			})
			.await??;

		Ok(Self { reservation, room })
	}

	/// Search through all [`Reservation`]s with a given [`ReservationFilter`]
	///
	/// If `owner` is given only that user's reservations are visible, the
	/// search text matches room name or requester name as a case-insensitive
	/// substring
	#[instrument(skip(conn))]
	pub async fn search(
		filter: ReservationFilter,
		owner: Option<i32>,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let found = conn
			.interact(move |conn| {
				let mut query = reservations::table
					.inner_join(rooms::table)
					.select((
						PrimitiveReservation::as_select(),
						Room::as_select(),
					))
					.order(reservations::id)
					.into_boxed();

				if let Some(status) = filter.status.as_status() {
					query = query.filter(reservations::status.eq(status));
				}

				if let Some(owner) = owner {
					query = query.filter(reservations::user_id.eq(owner));
				}

				if let Some(search) =
					filter.search.as_deref().filter(|s| !s.is_empty())
				{
					let pattern = format!("%{search}%");
					query = query.filter(
						rooms::name
							.ilike(pattern.clone())
							.or(reservations::full_name.ilike(pattern)),
					);
				}

				query.get_results(conn)
			})
			.await??
			.into_iter()
			.map(|(reservation, room)| Self { reservation, room })
			.collect();

		Ok(found)
	}
}

/// [`Reservation`] data required for creation
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub user_id:              i32,
	pub room_id:              i32,
	pub full_name:            String,
	pub course_section:       String,
	pub reservation_type:     ReservationType,
	pub start_time:           NaiveDateTime,
	pub end_time:             NaiveDateTime,
	pub activity_description: String,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	///
	/// New reservations always start out as [`ReservationStatus::Pending`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let created = conn
			.interact(|conn| {
				use self::reservations::dsl::*;

				diesel::insert_into(reservations)
					.values(self)
					.returning(PrimitiveReservation::as_returning())
					.get_result(conn)
			})
			.await??;

		let reservation = Reservation::get_by_id(created.id, conn).await?;

		info!(
			"created reservation {} for room {}",
			created.id, created.room_id
		);

		Ok(reservation)
	}
}

/// Replacement values for an existing reservation
#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = reservations)]
pub struct UpdateReservation {
	pub room_id:              i32,
	pub full_name:            String,
	pub course_section:       String,
	pub reservation_type:     ReservationType,
	pub start_time:           NaiveDateTime,
	pub end_time:             NaiveDateTime,
	pub activity_description: String,
}

impl UpdateReservation {
	/// Apply this [`UpdateReservation`] to the reservation with the given id
	#[instrument(skip(conn))]
	pub async fn apply(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<Reservation, Error> {
		conn.interact(move |conn| {
			use self::reservations::dsl::*;

			diesel::update(reservations.find(r_id))
				.set(self)
				.returning(PrimitiveReservation::as_returning())
				.get_result(conn)
		})
		.await??;

		let reservation = Reservation::get_by_id(r_id, conn).await?;

		info!("updated reservation {r_id}");

		Ok(reservation)
	}
}
