//! List posts from the content API

use anyhow::Result;

use crate::content::pagination::collect_pages;
use crate::Blog;

/// Print the listing after `pages - 1` load-more steps
pub async fn run(blog: &Blog, pages: usize) -> Result<()> {
    let client = blog.client()?;
    let pagination = collect_pages(&client, &blog.query(), &blog.dates(), pages).await?;

    println!("Posts ({}):", pagination.results.len());
    for post in &pagination.results {
        println!(
            "  {} - {} by {} [{}]",
            post.first_publication_date.as_deref().unwrap_or("-"),
            post.data.title,
            post.data.author,
            post.uid.as_deref().unwrap_or("no uid")
        );
    }
    if pagination.has_next_page() {
        println!("More posts at: {}", pagination.next_page);
    }

    Ok(())
}
