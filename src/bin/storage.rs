use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tubegrid::storage::disk::DiskStore;
use tubegrid::storage::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut host = "127.0.0.1".to_string();
    let mut port: u16 = 8090;
    let mut base_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                host = args[i + 1].clone();
                i += 2;
            }
            "--port" => {
                port = args[i + 1].parse()?;
                i += 2;
            }
            other => {
                base_dir = Some(PathBuf::from(other));
                i += 1;
            }
        }
    }

    let Some(base_dir) = base_dir else {
        eprintln!("Usage: {} [--host <addr>] [--port <port>] <baseDir>", args[0]);
        std::process::exit(1);
    };

    let bind_addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let store = Arc::new(DiskStore::open(&base_dir).await?);
    tracing::info!(
        "storage node serving {} on {}",
        store.base_dir().display(),
        bind_addr
    );

    let app = handlers::router(store);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
