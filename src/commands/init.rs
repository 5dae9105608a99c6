//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# spacetraveling configuration

# Site
title: spacetraveling
description: ''
language: pt-BR
timezone: ''
logo: /images/logo.svg

# URL
url: http://localhost:3000
root: /

# Directory
static_dir: static
public_dir: public

# Date format
date_format: DD MMM YYYY

# Pagination (leave empty to follow every page)
max_pages:

# Content API
## PRISMIC_API_ENDPOINT and PRISMIC_ACCESS_TOKEN override these
api:
  endpoint: ''
  document_type: post
  fetch:
    - post.title
    - post.subtitle
    - post.author
  page_size: 1
  timeout_secs: 30
"#;

const ENV_EXAMPLE: &str = "PRISMIC_API_ENDPOINT=https://your-repo.cdn.prismic.io/api/v2\nPRISMIC_ACCESS_TOKEN=\n";

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="240" height="26" viewBox="0 0 240 26"><text x="0" y="20" font-family="sans-serif" font-size="22" fill="#F8F8F8">spacetraveling<tspan fill="#FF57B2">.</tspan></text></svg>
"##;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("static/images"))?;
    fs::create_dir_all(target_dir.join("languages"))?;

    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join(".env.example"), ENV_EXAMPLE)?;
    fs::write(target_dir.join("static/images/logo.svg"), LOGO)?;

    Ok(())
}
