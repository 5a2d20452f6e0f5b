use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const SEED_POSTS: u64 = 100;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).compact().init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, seed = SEED_POSTS, "listening");
    mock_server::run(listener, mock_server::seed_posts(SEED_POSTS)).await
}
