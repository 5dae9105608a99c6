//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Fetch posts from the content API and write the static site
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let client = blog.client()?;
    tracing::info!("Fetching posts from {}", client.endpoint());

    let generator = Generator::new(blog)?;
    let summary = generator.generate(&client).await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages and {} posts in {:.2}s",
        summary.pages,
        summary.posts,
        duration.as_secs_f64()
    );

    Ok(())
}
