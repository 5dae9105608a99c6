//! Post view models

use serde::{Deserialize, Serialize};

use crate::api::{ApiResponse, Document};
use crate::helpers::{post_path, DateFormatter};

/// A post as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post identifier used in the `/post/<uid>` route
    pub uid: Option<String>,

    /// Publication date, already formatted for display
    pub first_publication_date: Option<String>,

    pub data: PostFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl Post {
    /// Map an API document into the view model
    ///
    /// The last publication date is shown, or the first one for documents
    /// that report no last date. Dates that fail to parse are kept verbatim.
    pub fn from_document(doc: Document, dates: &DateFormatter) -> Self {
        let raw_date = doc
            .last_publication_date
            .filter(|d| !d.trim().is_empty())
            .or(doc.first_publication_date)
            .filter(|d| !d.trim().is_empty());

        let first_publication_date = raw_date.map(|raw| {
            dates.format(&raw).unwrap_or_else(|| {
                tracing::warn!("Unparseable publication date {:?} on {}", raw, doc.id);
                raw
            })
        });

        Self {
            uid: doc.uid.filter(|u| !u.is_empty()),
            first_publication_date,
            data: PostFields {
                title: doc.data.title,
                subtitle: doc.data.subtitle,
                author: doc.data.author,
            },
        }
    }

    /// Site-relative path of this post's page
    pub fn path(&self) -> Option<String> {
        self.uid.as_deref().map(post_path)
    }
}

/// An ordered run of posts plus the cursor to the next page
///
/// `next_page` is either a fetchable URL or the empty string, which means
/// there is nothing left to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPagination {
    pub next_page: String,
    pub results: Vec<Post>,
}

impl PostPagination {
    /// Map one page of API results, normalizing a missing cursor to `""`
    pub fn from_response(response: ApiResponse, dates: &DateFormatter) -> Self {
        Self {
            next_page: response
                .next_page
                .map(|url| url.trim().to_string())
                .unwrap_or_default(),
            results: response
                .results
                .into_iter()
                .map(|doc| Post::from_document(doc, dates))
                .collect(),
        }
    }

    pub fn has_next_page(&self) -> bool {
        !self.next_page.is_empty()
    }

    /// Existing results followed by `page`'s, with `page`'s cursor
    pub fn append(self, page: PostPagination) -> Self {
        let mut results = self.results;
        results.extend(page.results);
        Self {
            next_page: page.next_page,
            results,
        }
    }
}
