#[macro_use]
extern crate tracing;

use axum_extra::extract::cookie::Key;
use roomtrack::mailer::Mailer;
use roomtrack::{AppState, Config, routes};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::DEBUG)
		.init();

	// Set up the configuration.
	let config = Config::from_env();

	// Set up the database connection pool.
	let database_pool = config.create_database_pool();

	// A fixed key keeps session cookies valid across restarts, a generated
	// one invalidates them all whenever the process is replaced.
	let cookie_jar_key = match std::env::var("COOKIE_SECRET") {
		Ok(secret) => Key::from(secret.as_bytes()),
		Err(_) => Key::generate(),
	};

	let stub_mailbox = config.create_stub_mailbox();
	let mailer = Mailer::new(&config, stub_mailbox);

	let state = AppState { config, database_pool, cookie_jar_key, mailer };

	let app = routes::get_app_router(state);

	let listener = TcpListener::bind("0.0.0.0:80").await.unwrap();
	debug!("listening on {}", listener.local_addr().unwrap());
	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
}
