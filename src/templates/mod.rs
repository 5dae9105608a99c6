//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on because every
//! title, subtitle and author comes from the content API; URLs we build
//! ourselves are marked `safe` in the templates.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, PostPagination};
use crate::helpers::url_for;
use crate::i18n::I18n;

/// Template renderer with the embedded site theme
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
    translations: HashMap<String, String>,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig, i18n: &I18n) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("error.html", include_str!("site/error.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/post_info.html",
                include_str!("site/partials/post_info.html"),
            ),
        ])?;

        Ok(Self {
            tera,
            site: SiteData::from_config(config),
            translations: i18n.get_all_translations(),
        })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("t", &self.translations);
        context
    }

    /// Render the post listing
    ///
    /// The load-more control links to `next_link`, and only appears while the
    /// pagination still has a cursor.
    pub fn render_index(
        &self,
        pagination: &PostPagination,
        next_link: Option<&str>,
    ) -> Result<String> {
        let posts: Vec<PostCard> = pagination
            .results
            .iter()
            .map(|p| PostCard::new(p, &self.site.root))
            .collect();
        let next_link = next_link.filter(|_| pagination.has_next_page());

        let mut context = self.base_context();
        context.insert("posts", &posts);
        context.insert("next_link", &next_link);
        self.render("index.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &Post) -> Result<String> {
        let mut context = self.base_context();
        context.insert("post", &PostCard::new(post, &self.site.root));
        self.render("post.html", &context)
    }

    /// Render an error page
    pub fn render_error(&self, status: u16, message: &str) -> Result<String> {
        let mut context = self.base_context();
        context.insert("status", &status);
        context.insert("message", message);
        self.render("error.html", &context)
    }

    pub fn translate(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub root: String,
    pub logo: String,
}

impl SiteData {
    fn from_config(config: &SiteConfig) -> Self {
        let logo = if config.logo.starts_with("http://") || config.logo.starts_with("https://") {
            config.logo.clone()
        } else {
            url_for(&config.root, &config.logo)
        };

        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            root: url_for(&config.root, ""),
            logo,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: Option<String>,
    pub url: Option<String>,
}

impl PostCard {
    fn new(post: &Post, root: &str) -> Self {
        Self {
            title: post.data.title.clone(),
            subtitle: post.data.subtitle.clone(),
            author: post.data.author.clone(),
            date: post.first_publication_date.clone(),
            url: post.path().map(|p| url_for(root, &p)),
        }
    }
}
