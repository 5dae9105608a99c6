//! Generator module - writes the static site using the built-in Tera templates

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::api::ContentSource;
use crate::content::pagination::{fetch_initial, load_more};
use crate::content::{Post, PostPagination};
use crate::helpers::{page_path, url_for, DateFormatter};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub pages: usize,
    pub posts: usize,
}

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    dates: DateFormatter,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new(&blog.config, &blog.i18n()?)?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
            dates: blog.dates(),
        })
    }

    /// Generate the entire site from `source`
    pub async fn generate<S: ContentSource>(&self, source: &S) -> Result<GenerateSummary> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.copy_static_assets()?;

        let (pagination, pages) = self.generate_index_pages(source).await?;
        let posts = self.generate_post_pages(&pagination.results)?;
        self.generate_posts_json(&pagination)?;

        Ok(GenerateSummary { pages, posts })
    }

    /// Write page 1..N, page N holding the listing after N-1 load-more steps
    ///
    /// Returns the final listing and the number of pages written.
    async fn generate_index_pages<S: ContentSource>(
        &self,
        source: &S,
    ) -> Result<(PostPagination, usize)> {
        let query = self.blog.query();
        let mut pagination = fetch_initial(source, &query, &self.dates).await?;
        let mut page_num = 1;

        loop {
            let capped = self.blog.config.max_pages.is_some_and(|max| page_num >= max);
            if capped && pagination.has_next_page() {
                tracing::warn!(
                    "Stopping at max_pages = {}, more posts are available",
                    page_num
                );
            }

            let next_link =
                (!capped).then(|| url_for(&self.blog.config.root, &page_path(page_num + 1)));
            let html = self.renderer.render_index(&pagination, next_link.as_deref())?;

            let output_path = self
                .blog
                .public_dir
                .join(page_path(page_num))
                .join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated: {:?}", output_path);

            if capped || !pagination.has_next_page() {
                break;
            }
            pagination = load_more(source, pagination, &self.dates).await?;
            page_num += 1;
        }

        tracing::info!(
            "Generated {} listing pages with {} posts",
            page_num,
            pagination.results.len()
        );
        Ok((pagination, page_num))
    }

    /// Generate one page per post with a usable uid
    fn generate_post_pages(&self, posts: &[Post]) -> Result<usize> {
        let mut count = 0;

        for post in posts {
            let Some(uid) = post.uid.as_deref() else {
                tracing::warn!("Skipping post without uid: {:?}", post.data.title);
                continue;
            };
            if !is_safe_segment(uid) {
                tracing::warn!("Skipping post with unsafe uid: {:?}", uid);
                continue;
            }

            let html = self.renderer.render_post(post)?;
            let output_path = self
                .blog
                .public_dir
                .join("post")
                .join(uid)
                .join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated post: {:?}", output_path);
            count += 1;
        }

        Ok(count)
    }

    /// Write the final listing as JSON
    fn generate_posts_json(&self, pagination: &PostPagination) -> Result<()> {
        let output_path = self.blog.public_dir.join("posts.json");
        let json = serde_json::to_string_pretty(pagination)?;
        write_file(&output_path, &json)?;
        tracing::info!("Generated posts.json");
        Ok(())
    }

    /// Copy static assets (images, etc.) to public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, content).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))
}

/// A uid usable as a single directory name
fn is_safe_segment(uid: &str) -> bool {
    !uid.is_empty()
        && uid != "."
        && uid != ".."
        && !uid.contains(['/', '\\'])
        && PathBuf::from(uid).components().count() == 1
}
