#[tokio::main]
async fn main() -> anyhow::Result<()> {
    comms911_server::start().await
}
