#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cardgen_backend::run().await
}
