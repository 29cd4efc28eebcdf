//! Controllers for the room registry

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use validator::Validate;

use crate::models::{NewRoom, Room};
use crate::schemas::room::{CreateRoomRequest, RoomResponse};
use crate::{AdminSession, DbPool, Error, Session};

#[instrument(skip(pool))]
pub(crate) async fn create_room(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let room = NewRoom::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_all_rooms(
	State(pool): State<DbPool>,
	_session: Session,
) -> Result<Json<Vec<RoomResponse>>, Error> {
	let conn = pool.get().await?;
	let rooms = Room::get_all(&conn).await?;

	Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_room(
	State(pool): State<DbPool>,
	_session: AdminSession,
	Path(room_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;
	Room::delete_with_reservations(room_id, &conn).await?;

	Ok(NoContent)
}
