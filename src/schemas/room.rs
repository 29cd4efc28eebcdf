use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{NewRoom, Room};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
	#[validate(length(
		min = 1,
		message = "room name must not be empty",
		code = "room-name-length"
	))]
	pub name:     String,
	#[validate(range(
		min = 1,
		message = "capacity must be a positive number",
		code = "room-capacity-range"
	))]
	pub capacity: i32,
	#[serde(default)]
	pub location: String,
}

impl From<CreateRoomRequest> for NewRoom {
	fn from(request: CreateRoomRequest) -> Self {
		Self {
			name:     request.name,
			capacity: request.capacity,
			location: request.location,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
	pub id:        i32,
	pub name:      String,
	pub capacity:  i32,
	pub location:  String,
	pub is_active: bool,
}

impl From<Room> for RoomResponse {
	fn from(room: Room) -> Self {
		Self {
			id:        room.id,
			name:      room.name,
			capacity:  room.capacity,
			location:  room.location,
			is_active: room.is_active,
		}
	}
}
