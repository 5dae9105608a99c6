use crate::config::ApiConfig;

/// A search query: predicates plus fetch/page options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    predicates: Vec<String>,
    fetch: Vec<String>,
    page_size: u32,
}

impl Query {
    const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Query all documents of one type
    pub fn documents_of_type(document_type: &str) -> Self {
        Self {
            predicates: vec![at("document.type", document_type)],
            fetch: Vec::new(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// The listing query described by the site's API settings
    pub fn from_config(cfg: &ApiConfig) -> Self {
        Self::documents_of_type(&cfg.document_type)
            .fetch(cfg.fetch.iter().cloned())
            .page_size(cfg.page_size)
    }

    pub fn fetch<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add an `at(path, value)` predicate
    pub fn and_at(mut self, path: &str, value: &str) -> Self {
        self.predicates.push(at(path, value));
        self
    }

    /// The `q` parameter, e.g. `[[at(document.type, "post")]]`
    pub fn q(&self) -> String {
        let inner: String = self.predicates.iter().map(|p| format!("[{}]", p)).collect();
        format!("[{}]", inner)
    }

    /// Query string pairs for `documents/search`
    pub fn params(&self, reference: &str, access_token: Option<&str>) -> Vec<(String, String)> {
        let mut params = vec![
            ("ref".to_string(), reference.to_string()),
            ("q".to_string(), self.q()),
        ];
        if !self.fetch.is_empty() {
            params.push(("fetch".to_string(), self.fetch.join(",")));
        }
        params.push(("pageSize".to_string(), self.page_size.to_string()));
        if let Some(token) = access_token {
            params.push(("access_token".to_string(), token.to_string()));
        }
        params
    }
}

fn at(path: &str, value: &str) -> String {
    format!("at({}, \"{}\")", path, value.replace('"', "\\\""))
}
