#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use lettre::Address;
use roomtrack::mailer::{Mailer, StubMailbox};
use roomtrack::{AppState, Config, SeedRoom, SeedUser, Seeder, routes};
use serde_json::{Value, json};

mod mock_db;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

pub const ACCESS_TOKEN_NAME: &str = "roomtrack_access_token";

pub const ADMIN_EMAIL: &str = "admin@campus.example";
pub const ADMIN_PASSWORD: &str = "open-sesame-admin";
pub const STUDENT_EMAIL: &str = "student@campus.example";
pub const STUDENT_PASSWORD: &str = "open-sesame-student";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:          TestServer,
	pub db_guard:     DatabaseGuard,
	pub stub_mailbox: Arc<StubMailbox>,
}

impl TestEnv {
	/// Get a test environment with mocked resources for running tests
	///
	/// # Panics
	/// Panics if building the test server or seeding the database fails
	pub async fn new() -> Self {
		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool();

		let config = Config {
			database_url: test_pool_guard.database_url().to_string(),
			production: false,

			access_token_name: ACCESS_TOKEN_NAME.to_string(),
			access_token_lifetime: time::Duration::hours(1),

			email_address: "noreply@campus.example".parse::<Address>().unwrap(),
			email_smtp_server: "stub".to_string(),
			email_smtp_password: String::new(),
			email_queue_size: 32,
		};

		{
			let conn = test_pool.get().await.unwrap();
			let seeder = Seeder::new(&conn);

			seeder
				.populate("seed/accounts.json", async |conn, accounts| {
					for account in accounts {
						SeedUser::insert(account, conn).await?;
					}

					Ok(())
				})
				.await;

			seeder
				.populate("seed/rooms.json", async |conn, rooms| {
					for room in rooms {
						SeedRoom::insert(room, conn).await?;
					}

					Ok(())
				})
				.await;
		}

		let cookie_jar_key = Key::from(&[0u8; 64]);

		let stub_mailbox = config.create_stub_mailbox();
		let mailer = Mailer::new(&config, stub_mailbox.clone());

		let state = AppState {
			config,
			database_pool: test_pool.clone(),
			cookie_jar_key,
			mailer,
		};
		let app = routes::get_app_router(state);

		let test_server =
			TestServer::builder().save_cookies().build(app).unwrap();

		TestEnv {
			app:          test_server,
			db_guard:     test_pool_guard,
			stub_mailbox: stub_mailbox.unwrap(),
		}
	}

	/// Log in with the given credentials, keeping the session cookie
	pub async fn login(self, email: &str, password: &str) -> Self {
		let response = self
			.app
			.post("/auth/login")
			.json(&json!({ "email": email, "password": password }))
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);

		self
	}

	/// Log in as the seeded student account
	pub async fn login_student(self) -> Self {
		self.login(STUDENT_EMAIL, STUDENT_PASSWORD).await
	}

	/// Log in as the seeded administrator account
	pub async fn login_admin(self) -> Self {
		self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
	}

	/// Look up a seeded room's id by name, requires a logged-in session
	pub async fn room_id(&self, name: &str) -> i64 {
		let rooms = self.app.get("/rooms").await.json::<Value>();

		rooms
			.as_array()
			.unwrap()
			.iter()
			.find(|r| r["name"] == name)
			.unwrap_or_else(|| panic!("no room named {name}"))["id"]
			.as_i64()
			.unwrap()
	}

	/// Run `f` and assert it queues no email
	pub async fn expect_no_mail<F, R, T>(&self, f: F) -> T
	where
		F: FnOnce() -> R,
		R: Future<Output = T>,
	{
		let outbox_size = { self.stub_mailbox.mailbox.lock().len() };

		let result = f().await;

		// Wait for up to 1 second or until a condvar notification is received
		// to make sure no queued emails are missed
		let mut mailbox = self.stub_mailbox.mailbox.lock();
		if mailbox.len() == outbox_size {
			self.stub_mailbox
				.signal
				.wait_for(&mut mailbox, Duration::from_secs(1));
		}

		assert_eq!(outbox_size, mailbox.len(), "expected no emails to be sent");

		result
	}

	/// Run `f` and assert it queues exactly one email for `receiver`
	pub async fn expect_mail_to<F, R, T>(&self, receiver: &str, f: F) -> T
	where
		F: FnOnce() -> R,
		R: Future<Output = T>,
	{
		let outbox_size = { self.stub_mailbox.mailbox.lock().len() };

		let result = f().await;

		// Wait for up to 1 second or until a condvar notification is received
		// to make sure no queued emails are missed
		let mut mailbox = self.stub_mailbox.mailbox.lock();
		if mailbox.len() == outbox_size {
			let wait_res = self
				.stub_mailbox
				.signal
				.wait_for(&mut mailbox, Duration::from_secs(1));

			assert!(!wait_res.timed_out(), "timed out waiting for email");
		}

		assert_eq!(
			mailbox.len(),
			outbox_size + 1,
			"expected an email to be sent"
		);

		let last_mail = mailbox.last().unwrap();
		let receiver = receiver.parse::<lettre::Address>().unwrap();

		assert_eq!(last_mail.envelope().to(), &[receiver]);

		result
	}
}
