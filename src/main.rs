use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tubegrid::cluster;
use tubegrid::cluster::router::ContentRouter;
use tubegrid::content::{ContentStore, FsContentStore};
use tubegrid::metadata::SqliteMetadataStore;
use tubegrid::web::{self, AppState};

// 256 MiB, the upstream upload cap; also bounds single-chunk sizes.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 1 << 28;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut admin_addr: Option<SocketAddr> = None;
    let mut db_path: PathBuf = PathBuf::from("videos.db");
    let mut node_addresses: Vec<String> = vec![];
    let mut content_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--admin" => {
                admin_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--db" => {
                db_path = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--nodes" => {
                node_addresses = args[i + 1]
                    .split(',')
                    .map(|address| address.trim().to_string())
                    .filter(|address| !address.is_empty())
                    .collect();
                i += 2;
            }
            "--dir" => {
                content_dir = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let Some(bind_addr) = bind_addr else {
        print_usage(&args[0]);
        std::process::exit(1);
    };

    let metadata = SqliteMetadataStore::connect(&db_path).await?;
    tracing::info!("catalog database open at {}", db_path.display());

    let content: Arc<dyn ContentStore> = match content_dir {
        Some(dir) => {
            tracing::info!("using local content backend at {}", dir.display());
            Arc::new(FsContentStore::open(&dir).await?)
        }
        None => {
            let Some(admin_addr) = admin_addr else {
                eprintln!("--admin is required with the network backend");
                print_usage(&args[0]);
                std::process::exit(1);
            };

            let content_router = Arc::new(ContentRouter::new(&node_addresses));
            tracing::info!(
                "placement ring initialized with {} node(s)",
                node_addresses.len()
            );

            // Admin RPC plane runs beside the public server.
            let admin_app = cluster::handlers::router(content_router.clone());
            let admin_listener = tokio::net::TcpListener::bind(admin_addr).await?;
            tracing::info!("admin server listening on {}", admin_addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(admin_listener, admin_app).await {
                    tracing::error!("admin server failed: {}", e);
                }
            });

            content_router
        }
    };

    let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    let state = AppState { metadata, content };
    let app = web::build_router(state, max_upload_bytes);

    tracing::info!("web server listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} --bind <addr:port> --admin <addr:port> [--db <path>] [--nodes <addr,addr,...>]",
        program
    );
    eprintln!("       {} --bind <addr:port> --dir <path> [--db <path>]", program);
    eprintln!(
        "Example: {} --bind 127.0.0.1:8080 --admin 127.0.0.1:8081 --nodes 127.0.0.1:9001,127.0.0.1:9002",
        program
    );
    eprintln!("Example: {} --bind 127.0.0.1:8080 --dir ./content", program);
}
