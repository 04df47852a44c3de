#[tokio::main]
async fn main() -> anyhow::Result<()> {
    knowledgebot_server::start().await
}
