use venue_rank_engine::catalog::VenueCatalog;
use venue_rank_engine::server::RankServer;

fn main() {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let Some(path) = std::env::args().nth(1) else {
		eprintln!("usage: venue-rank-engine <catalog.json>");
		std::process::exit(2);
	};

	let catalog = match VenueCatalog::from_json_file(&path) {
		Ok(c) => c,
		Err(e) => {
			tracing::error!("Failed to load catalog {}: {}", path, e);
			std::process::exit(1);
		}
	};

	tracing::info!(
		"venue-rank-engine ready: {} venues, dimension {}",
		catalog.len(),
		catalog.vocabulary().dimension()
	);

	let mut server = RankServer::new(catalog);
	if let Err(e) = server.run() {
		tracing::error!("Server error: {}", e);
		std::process::exit(1);
	}
}
