use crate::Error;
use crate::mailer::Mailer;
use crate::models::{PrimitiveReservation, ReservationStatus, User};

impl Mailer {
	/// Queue a status-change notification for the reservation's owner
	#[instrument(skip(self, owner))]
	pub(crate) fn send_status_update(
		&self,
		owner: &User,
		room_name: &str,
		reservation: &PrimitiveReservation,
	) -> Result<(), Error> {
		let verdict = match reservation.status {
			ReservationStatus::Pending => "moved back to pending",
			ReservationStatus::Approved => "approved",
			ReservationStatus::Rejected => "rejected",
			ReservationStatus::Cancelled => "cancelled",
		};

		let subject =
			format!("Reservation #{} has been {verdict}", reservation.id);
		let body = format!(
			"Hello {},\n\nYour reservation for {room_name} starting {} has \
			 been {verdict}.\n\nThis is an automated message from the campus \
			 room tracker.",
			owner.username,
			reservation.start_time.format("%b %d, %Y %I:%M %p"),
		);

		let mail = self.try_build_message(owner, &subject, &body)?;
		self.try_send(mail)?;

		info!(
			"queued status notification for reservation {}",
			reservation.id
		);

		Ok(())
	}
}
