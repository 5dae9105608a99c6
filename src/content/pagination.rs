//! Initial query and "load more" flow

use crate::api::{ContentSource, Error, Query};
use crate::content::PostPagination;
use crate::helpers::DateFormatter;

/// Run the listing query and map its first page
pub async fn fetch_initial<S: ContentSource>(
    source: &S,
    query: &Query,
    dates: &DateFormatter,
) -> Result<PostPagination, Error> {
    let response = source.query(query).await?;
    let pagination = PostPagination::from_response(response, dates);
    tracing::debug!(
        "Initial page: {} posts, more: {}",
        pagination.results.len(),
        pagination.has_next_page()
    );
    Ok(pagination)
}

/// Fetch the page behind `next_page` and append it
///
/// An exhausted pagination is returned as is, without a request. A failed
/// fetch is returned as the error and the previous state is dropped with it,
/// so callers that want to keep showing it must hold their own copy.
pub async fn load_more<S: ContentSource>(
    source: &S,
    pagination: PostPagination,
    dates: &DateFormatter,
) -> Result<PostPagination, Error> {
    if !pagination.has_next_page() {
        return Ok(pagination);
    }

    let response = source.fetch_page(&pagination.next_page).await?;
    let page = PostPagination::from_response(response, dates);
    tracing::debug!(
        "Loaded {} more posts from {}",
        page.results.len(),
        pagination.next_page
    );
    Ok(pagination.append(page))
}

/// The listing after `pages - 1` load-more steps
///
/// Stops early once the cursor runs out; `pages == 0` is treated as 1.
pub async fn collect_pages<S: ContentSource>(
    source: &S,
    query: &Query,
    dates: &DateFormatter,
    pages: usize,
) -> Result<PostPagination, Error> {
    let mut pagination = fetch_initial(source, query, dates).await?;
    for _ in 1..pages {
        if !pagination.has_next_page() {
            break;
        }
        pagination = load_more(source, pagination, dates).await?;
    }
    Ok(pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::testing::{MemorySource, SAMPLE_POSTS};

    fn query() -> Query {
        Query::from_config(&ApiConfig::default())
    }

    #[tokio::test]
    async fn test_load_more_appends_in_order() {
        let source = MemorySource::default();
        let dates = DateFormatter::default();

        let initial = fetch_initial(&source, &query(), &dates).await.unwrap();
        assert_eq!(initial.next_page, "mem://page/2");

        let more = load_more(&source, initial.clone(), &dates).await.unwrap();
        assert_eq!(more.results.len(), 2);
        assert_eq!(more.results[0], initial.results[0]);
        assert_eq!(more.results[1].uid.as_deref(), Some(SAMPLE_POSTS[1].0));
        assert_eq!(more.next_page, "mem://page/3");

        let last = load_more(&source, more.clone(), &dates).await.unwrap();
        assert_eq!(&last.results[..2], &more.results[..]);
        assert_eq!(last.results[2].uid.as_deref(), Some(SAMPLE_POSTS[2].0));
        assert_eq!(last.next_page, "");
    }

    #[tokio::test]
    async fn test_load_more_when_exhausted_is_noop() {
        // every fetch fails, so any request would surface as an error
        let source = MemorySource {
            failing_pages: vec![1, 2, 3],
        };
        let dates = DateFormatter::default();
        let done = PostPagination {
            next_page: String::new(),
            results: Vec::new(),
        };
        let same = load_more(&source, done.clone(), &dates).await.unwrap();
        assert_eq!(same, done);
    }

    #[tokio::test]
    async fn test_load_more_propagates_failure() {
        let source = MemorySource {
            failing_pages: vec![2],
        };
        let dates = DateFormatter::default();
        let initial = fetch_initial(&source, &query(), &dates).await.unwrap();
        let err = load_more(&source, initial, &dates).await.unwrap_err();
        assert!(matches!(err, Error::StatusCode(500)));
    }

    #[tokio::test]
    async fn test_collect_pages() {
        let source = MemorySource::default();
        let dates = DateFormatter::default();

        let one = collect_pages(&source, &query(), &dates, 0).await.unwrap();
        assert_eq!(one.results.len(), 1);

        let two = collect_pages(&source, &query(), &dates, 2).await.unwrap();
        assert_eq!(two.results.len(), 2);
        assert!(two.has_next_page());

        let all = collect_pages(&source, &query(), &dates, 10).await.unwrap();
        assert_eq!(all.results.len(), SAMPLE_POSTS.len());
        assert!(!all.has_next_page());
    }
}
