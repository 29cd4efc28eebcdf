use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Reservation, ReservationStatus, ReservationType};
use crate::schemas::room::RoomResponse;

/// Data submitted by the reservation form
///
/// `duration_hours` arrives as free text, the parse rules live in the
/// controller
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub room_id: i32,
	#[validate(length(
		min = 1,
		message = "full name must not be empty",
		code = "full-name-length"
	))]
	pub full_name: String,
	#[validate(length(
		min = 1,
		message = "course/section must not be empty",
		code = "course-section-length"
	))]
	pub course_section: String,
	pub reservation_type: ReservationType,
	pub start_time: NaiveDateTime,
	#[validate(length(
		min = 1,
		message = "duration must not be empty",
		code = "duration-length"
	))]
	pub duration_hours: String,
	#[validate(length(
		min = 1,
		message = "purpose must not be empty",
		code = "activity-description-length"
	))]
	pub activity_description: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct UpdateReservationStatusRequest {
	pub status: ReservationStatus,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:                   i32,
	pub user_id:              i32,
	pub room:                 RoomResponse,
	pub full_name:            String,
	pub course_section:       String,
	pub reservation_type:     ReservationType,
	pub start_time:           NaiveDateTime,
	pub end_time:             NaiveDateTime,
	pub activity_description: String,
	pub status:               ReservationStatus,
	pub created_at:           NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
	fn from(value: Reservation) -> Self {
		let Reservation { reservation, room } = value;

		Self {
			id:                   reservation.id,
			user_id:              reservation.user_id,
			room:                 room.into(),
			full_name:            reservation.full_name,
			course_section:       reservation.course_section,
			reservation_type:     reservation.reservation_type,
			start_time:           reservation.start_time,
			end_time:             reservation.end_time,
			activity_description: reservation.activity_description,
			status:               reservation.status,
			created_at:           reservation.created_at,
		}
	}
}
