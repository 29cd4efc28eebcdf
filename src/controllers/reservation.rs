//! Controllers for the reservation ledger

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use chrono::{NaiveDateTime, TimeDelta, Utc};
use validator::Validate;

use crate::mailer::Mailer;
use crate::models::{
	NewReservation,
	PrimitiveReservation,
	Reservation,
	ReservationFilter,
	ReservationStatus,
	Room,
	UpdateReservation,
	User,
};
use crate::schemas::reservation::{
	CreateReservationRequest,
	ReservationResponse,
	UpdateReservationStatusRequest,
};
use crate::{AdminSession, DbPool, DeleteReservationError, Error, Session};

/// Duration applied when the submitted duration text does not parse
const DEFAULT_DURATION_HOURS: f64 = 1.0;

/// How long students may remove their own reservations after creating them
const SELF_DELETE_WINDOW_MINUTES: i64 = 5;

/// Parse the free-text duration field and derive the end of the time range
///
/// Unparsable text falls back to [`DEFAULT_DURATION_HOURS`], a parsed value
/// of zero or less is rejected
fn derive_end_time(
	start_time: NaiveDateTime,
	duration_text: &str,
) -> Result<NaiveDateTime, Error> {
	let duration_hours = duration_text
		.trim()
		.parse::<f64>()
		.unwrap_or(DEFAULT_DURATION_HOURS);

	if duration_hours <= 0.0 {
		return Err(Error::ValidationError(
			"duration must be a positive number of hours".to_string(),
		));
	}

	#[allow(clippy::cast_possible_truncation)]
	let duration = TimeDelta::seconds((duration_hours * 3600.0).round() as i64);

	Ok(start_time + duration)
}

#[instrument(skip(pool))]
pub(crate) async fn create_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let end_time =
		derive_end_time(request.start_time, &request.duration_hours)?;

	let new_reservation = NewReservation {
		user_id: session.data.user_id,
		room_id: request.room_id,
		full_name: request.full_name,
		course_section: request.course_section,
		reservation_type: request.reservation_type,
		start_time: request.start_time,
		end_time,
		activity_description: request.activity_description,
	};

	let conn = pool.get().await?;
	let reservation = new_reservation.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_reservations(
	State(pool): State<DbPool>,
	session: Session,
	Query(filter): Query<ReservationFilter>,
) -> Result<Json<Vec<ReservationResponse>>, Error> {
	// Administrators see every reservation, everyone else only their own
	let owner = if session.data.role.is_admin() {
		None
	} else {
		Some(session.data.user_id)
	};

	let conn = pool.get().await?;
	let reservations = Reservation::search(filter, owner, &conn).await?;

	Ok(Json(
		reservations.into_iter().map(ReservationResponse::from).collect(),
	))
}

#[instrument(skip(pool))]
pub(crate) async fn get_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(reservation_id): Path<i32>,
) -> Result<Json<ReservationResponse>, Error> {
	let conn = pool.get().await?;
	let reservation = Reservation::get_by_id(reservation_id, &conn).await?;

	if !session.data.role.is_admin()
		&& reservation.reservation.user_id != session.data.user_id
	{
		return Err(Error::Forbidden);
	}

	Ok(Json(reservation.into()))
}

#[instrument(skip(pool, mailer))]
pub(crate) async fn update_reservation_status(
	State(pool): State<DbPool>,
	State(mailer): State<Mailer>,
	session: Session,
	Path(reservation_id): Path<i32>,
	Json(request): Json<UpdateReservationStatusRequest>,
) -> Result<Json<ReservationResponse>, Error> {
	let conn = pool.get().await?;

	let is_admin = session.data.role.is_admin();

	if !is_admin {
		// Students may only cancel, and only their own reservations
		let current =
			PrimitiveReservation::get_by_id(reservation_id, &conn).await?;

		if current.user_id != session.data.user_id
			|| request.status != ReservationStatus::Cancelled
		{
			return Err(Error::Forbidden);
		}
	}

	let updated =
		PrimitiveReservation::set_status(reservation_id, request.status, &conn)
			.await?;

	if is_admin {
		notify_owner(&updated, &pool, &mailer).await;
	}

	let reservation = Reservation::get_by_id(reservation_id, &conn).await?;

	Ok(Json(reservation.into()))
}

/// Send a best-effort status notification to the reservation's owner
///
/// Failures are logged and never surfaced to the reservation flow
async fn notify_owner(
	reservation: &PrimitiveReservation,
	pool: &DbPool,
	mailer: &Mailer,
) {
	let result = async {
		let conn = pool.get().await?;
		let owner = User::get(reservation.user_id, &conn).await?;
		let room = Room::get(reservation.room_id, &conn).await?;

		mailer.send_status_update(&owner, &room.name, reservation)
	}
	.await;

	if let Err(e) = result {
		warn!(
			"could not queue status notification for reservation {} -- {e:?}",
			reservation.id
		);
	}
}

#[instrument(skip(pool))]
pub(crate) async fn update_reservation(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(reservation_id): Path<i32>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ReservationResponse>, Error> {
	request.validate()?;

	let end_time =
		derive_end_time(request.start_time, &request.duration_hours)?;

	let update = UpdateReservation {
		room_id: request.room_id,
		full_name: request.full_name,
		course_section: request.course_section,
		reservation_type: request.reservation_type,
		start_time: request.start_time,
		end_time,
		activity_description: request.activity_description,
	};

	let conn = pool.get().await?;
	let reservation = update.apply(reservation_id, &conn).await?;

	Ok(Json(reservation.into()))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_reservation(
	State(pool): State<DbPool>,
	session: Session,
	Path(reservation_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	let reservation =
		PrimitiveReservation::get_by_id(reservation_id, &conn).await?;

	if !session.data.role.is_admin() {
		if reservation.user_id != session.data.user_id {
			return Err(Error::Forbidden);
		}

		let age = Utc::now().naive_utc() - reservation.created_at;
		if age > TimeDelta::minutes(SELF_DELETE_WINDOW_MINUTES) {
			return Err(DeleteReservationError::WindowExpired(
				reservation.created_at,
			)
			.into());
		}
	}

	PrimitiveReservation::delete_by_id(reservation_id, &conn).await?;

	Ok(NoContent)
}
