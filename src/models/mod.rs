mod reservation;
mod room;
mod user;

pub use reservation::{
	NewReservation,
	PrimitiveReservation,
	Reservation,
	ReservationFilter,
	ReservationStatus,
	ReservationType,
	StatusFilter,
	UpdateReservation,
};
pub use room::{NewRoom, Room};
pub use user::{User, UserRole};
