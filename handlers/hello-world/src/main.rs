use anyhow::Result;
use edge_function_host::{init_tracing, serve, HostConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    serve(HostConfig::from_env(), hello_world::handle).await
}
