#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kaki_backend::run().await
}
