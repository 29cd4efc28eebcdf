use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{login, logout};
use crate::controllers::healthcheck;
use crate::controllers::reservation::{
	create_reservation,
	delete_reservation,
	get_reservation,
	get_reservations,
	update_reservation,
	update_reservation_status,
};
use crate::controllers::room::{create_room, delete_room, get_all_rooms};
use crate::middleware::AuthLayer;

/// Build the application router
#[must_use]
pub fn get_app_router(state: AppState) -> Router {
	let public_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", Router::new().route("/login", post(login)));

	let session_routes = Router::new()
		.nest("/auth", Router::new().route("/logout", post(logout)))
		.nest(
			"/rooms",
			Router::new()
				.route("/", get(get_all_rooms).post(create_room))
				.route("/{id}", delete(delete_room)),
		)
		.nest(
			"/reservations",
			Router::new()
				.route("/", get(get_reservations).post(create_reservation))
				.route(
					"/{id}",
					get(get_reservation)
						.patch(update_reservation)
						.delete(delete_reservation),
				)
				.route("/{id}/status", patch(update_reservation_status)),
		)
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.merge(public_routes)
		.merge(session_routes)
		.layer(TraceLayer::new_for_http())
		.layer(TimeoutLayer::new(Duration::from_secs(5)))
		.with_state(state)
}
