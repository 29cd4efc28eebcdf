use std::path::PathBuf;

use clap::Parser;
use deadpool_diesel::postgres::{Manager, Pool};
use roomtrack::{DbConn, Error, SeedRoom, SeedUser};

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'a', default_value = "seed/accounts.json")]
	accounts: PathBuf,
	#[arg(long, short = 'r', default_value = "seed/rooms.json")]
	rooms:    PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	let accounts: Vec<SeedUser> =
		serde_json::from_str(&std::fs::read_to_string(&cli.accounts)?)?;

	println!("Provisioning {} accounts…", accounts.len());
	for account in accounts {
		let email = account.email.clone();
		account.insert(&conn).await?;
		println!("  upserted account {email}");
	}

	let rooms: Vec<SeedRoom> =
		serde_json::from_str(&std::fs::read_to_string(&cli.rooms)?)?;

	println!("Provisioning {} rooms…", rooms.len());
	for room in rooms {
		let name = room.name.clone();
		room.insert(&conn).await?;
		println!("  upserted room {name}");
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url =
		std::env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}
