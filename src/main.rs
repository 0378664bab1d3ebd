#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slidecanvas_lib::run().await
}
