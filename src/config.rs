use std::sync::Arc;

use deadpool_diesel::postgres::{Manager, Pool};
use lettre::Address;
use time::Duration;

use crate::mailer::StubMailbox;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub production:   bool,

	pub access_token_name:     String,
	pub access_token_lifetime: Duration,

	pub email_address:       Address,
	pub email_smtp_server:   String,
	pub email_smtp_password: String,
	pub email_queue_size:    usize,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let production =
			std::env::var("PRODUCTION").map(|v| v == "true").unwrap_or(false);

		let access_token_name = Self::get_env_var("ACCESS_TOKEN_NAME");
		let access_token_lifetime = Duration::minutes(
			Self::get_env_var("ACCESS_TOKEN_LIFETIME_MINUTES")
				.parse::<i64>()
				.unwrap(),
		);

		let email_address =
			Self::get_env_var("EMAIL_ADDRESS").parse::<Address>().unwrap();
		let email_smtp_server = Self::get_env_var("EMAIL_SMTP_SERVER");
		let email_smtp_password = Self::get_env_var("EMAIL_SMTP_PASSWORD");
		let email_queue_size =
			Self::get_env_var("EMAIL_QUEUE_SIZE").parse::<usize>().unwrap();

		Self {
			database_url,
			production,
			access_token_name,
			access_token_lifetime,
			email_address,
			email_smtp_server,
			email_smtp_password,
			email_queue_size,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Create a stub mailbox if the configured SMTP server is a stub
	#[must_use]
	pub fn create_stub_mailbox(&self) -> Option<Arc<StubMailbox>> {
		if self.email_smtp_server == "stub" {
			Some(Arc::new(StubMailbox::default()))
		} else {
			None
		}
	}
}
