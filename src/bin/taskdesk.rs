use anyhow::Result;
use taskdesk::cli::start;

#[tokio::main]
async fn main() -> Result<()> {
    let (action, globals) = start()?;

    action.execute(&globals).await
}
