//! Continuation-token pagination
//!
//! List APIs return one page at a time together with an opaque
//! continuation token. [`Sequencer`] follows those tokens and flattens the
//! pages into a single `Vec`, in the order they were received.

use crate::error::{ComputeError, Result};
use std::future::Future;

/// One page of a list API response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// Final page (no continuation token)
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Token for the next request; an empty token means there is none
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Follows continuation tokens until the last page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequencer {
    max_pages: Option<usize>,
}

impl Sequencer {
    /// Unbounded sequencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`ComputeError::PageLimit`] instead of fetching more than `max_pages`
    pub fn with_max_pages(max_pages: usize) -> Self {
        Self {
            max_pages: Some(max_pages),
        }
    }

    pub fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    /// Fetch every page and concatenate the items.
    ///
    /// `fetch` is called with `None` for the first page and with the previous
    /// page's continuation token afterwards.
    pub async fn sequence<T, F, Fut>(&self, mut fetch: F) -> Result<Vec<T>>
    where
        F: FnMut(Option<String>) -> Fut + Send,
        Fut: Future<Output = Result<Page<T>>> + Send,
        T: Send,
    {
        let mut items = Vec::new();
        let mut token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if let Some(max) = self.max_pages {
                if pages >= max {
                    return Err(ComputeError::PageLimit(max));
                }
            }

            let page = fetch(token.take()).await?;
            pages += 1;

            let next = page.continuation().map(str::to_string);
            tracing::debug!(
                "Fetched page {} ({} items, more: {})",
                pages,
                page.items.len(),
                next.is_some()
            );
            items.extend(page.items);

            match next {
                Some(t) => token = Some(t),
                None => break,
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Serves `pages` in order, chaining them with tokens "t1", "t2", ...
    fn paged(
        pages: Vec<Vec<u32>>,
    ) -> impl FnMut(Option<String>) -> std::future::Ready<Result<Page<u32>>> + Send {
        let total = pages.len();
        move |token: Option<String>| {
            let index = match token.as_deref() {
                None => 0,
                Some(t) => t.trim_start_matches('t').parse::<usize>().unwrap(),
            };
            let next = if index + 1 < total {
                Some(format!("t{}", index + 1))
            } else {
                None
            };
            std::future::ready(Ok(Page::new(pages[index].clone(), next)))
        }
    }

    #[tokio::test]
    async fn test_single_page() {
        let items = Sequencer::new()
            .sequence(paged(vec![vec![1, 2, 3]]))
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_pages_are_concatenated_in_order() {
        let items = Sequencer::new()
            .sequence(paged(vec![vec![1, 2], vec![], vec![3], vec![4, 5]]))
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_tokens_are_forwarded() {
        let tokens = Arc::new(Mutex::new(Vec::new()));
        let recorded = tokens.clone();
        let items = Sequencer::new()
            .sequence(move |token: Option<String>| {
                recorded.lock().unwrap().push(token.clone());
                let page = match token.as_deref() {
                    None => Page::new(vec!["a"], Some("next-1".to_string())),
                    Some("next-1") => Page::last(vec!["b"]),
                    Some(other) => panic!("unexpected token {other}"),
                };
                async move { Ok(page) }
            })
            .await
            .unwrap();

        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(
            *tokens.lock().unwrap(),
            vec![None, Some("next-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_token_ends_sequence() {
        let mut calls = 0;
        let items = Sequencer::new()
            .sequence(|_token| {
                calls += 1;
                std::future::ready(Ok(Page::new(vec![7u8], Some(String::new()))))
            })
            .await
            .unwrap();
        assert_eq!(items, vec![7]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_error_is_returned_unchanged() {
        let result: Result<Vec<u8>> = Sequencer::new()
            .sequence(|token: Option<String>| {
                std::future::ready(match token {
                    None => Ok(Page::new(vec![1], Some("t1".to_string()))),
                    Some(_) => Err(ComputeError::Api {
                        operation: "DescribeTags",
                        code: Some("RequestLimitExceeded".to_string()),
                        message: "slow down".to_string(),
                    }),
                })
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code(), Some("RequestLimitExceeded"));
    }

    #[tokio::test]
    async fn test_page_limit() {
        let result = Sequencer::with_max_pages(2)
            .sequence(paged(vec![vec![1], vec![2], vec![3]]))
            .await;
        assert!(matches!(result, Err(ComputeError::PageLimit(2))));

        let items = Sequencer::with_max_pages(3)
            .sequence(paged(vec![vec![1], vec![2], vec![3]]))
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
