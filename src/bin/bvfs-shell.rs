use bvfs::{BackendKind, BrowserSession, BvfsRow, CatalogConfig, SqlxGateway};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "bvfs-shell")]
#[command(about = "Interactively browse a Bareos-style catalog and build restore lists")]
struct Cli {
	/// Catalog connection string (postgres://..., mysql://..., or a SQLite file path)
	#[arg(short, long)]
	dsn: String,

	/// Which backend `dsn` addresses
	#[arg(short, long, value_enum, default_value_t = CliBackend::Sqlite)]
	backend: CliBackend,

	/// Comma-separated JobIds to browse
	#[arg(short, long, default_value = "1")]
	jobs: String,

	/// Enable verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum CliBackend {
	Postgres,
	Mysql,
	Sqlite,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
	tracing_subscriber::fmt().with_max_level(level).init();

	info!(dsn = %cli.dsn, "connecting to catalog");

	let config = match cli.backend {
		CliBackend::Postgres => CatalogConfig::postgres(cli.dsn.clone()),
		CliBackend::Mysql => CatalogConfig::mysql(cli.dsn.clone()),
		CliBackend::Sqlite => CatalogConfig::sqlite(cli.dsn.clone()),
	};
	debug_assert_eq!(
		match cli.backend {
			CliBackend::Postgres => BackendKind::PostgreSql,
			CliBackend::Mysql => BackendKind::MySql,
			CliBackend::Sqlite => BackendKind::Sqlite,
		},
		config.backend
	);

	let gateway = Arc::new(SqlxGateway::connect(&config).await?);
	let mut session = BrowserSession::new(gateway);
	session.set_job_ids(&cli.jobs)?;
	session.bvfs_update_cache().await?;

	let root = session.get_root().await?;
	session.chdir_id(root);

	let mut more = true;
	while more {
		let mut rows = Vec::new();
		more = session
			.ls_dirs(&mut |row: BvfsRow| rows.push(row))
			.await?;
		for row in &rows {
			if let BvfsRow::Dir { name, path_id } = row {
				println!("{name}\t(PathId {path_id})");
			}
		}
		if more {
			session.next_page();
		}
	}

	Ok(())
}
