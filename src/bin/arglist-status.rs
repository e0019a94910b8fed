use anyhow::Result;
use arglist_status::server::serve;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    serve().await
}
