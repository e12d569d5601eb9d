use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::app::Result;

/// Continuation that fetches the next cumulative page.
pub type LoadMoreFn<T> =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Paginated<T>>> + Send + Sync>;

/// One page of a lazily-fetched, conceptually infinite sequence.
///
/// A present continuation produces a *new* `Paginated` whose items are the
/// items seen so far plus the freshly fetched ones (cumulative, not delta).
/// An absent continuation marks the terminal page.
pub struct Paginated<T> {
    pub items: Vec<T>,
    load_more: Option<LoadMoreFn<T>>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, load_more: Option<LoadMoreFn<T>>) -> Self {
        Self { items, load_more }
    }

    pub fn terminal(items: Vec<T>) -> Self {
        Self {
            items,
            load_more: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.load_more.is_some()
    }

    /// Start fetching the next cumulative page, if there is one.
    pub fn load_more(&self) -> Option<BoxFuture<'static, Result<Paginated<T>>>> {
        self.load_more.as_ref().map(|next| next())
    }
}

impl<T: Clone> Clone for Paginated<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            load_more: self.load_more.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Paginated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginated")
            .field("items", &self.items)
            .field("has_more", &self.has_more())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_page_has_no_continuation() {
        let page = Paginated::terminal(vec![1, 2, 3]);
        assert!(!page.has_more());
        assert!(page.load_more().is_none());
    }

    #[tokio::test]
    async fn test_load_more_invokes_continuation() {
        let next: LoadMoreFn<i32> =
            Arc::new(|| Box::pin(async { Ok(Paginated::terminal(vec![1, 2])) }));
        let page = Paginated::new(vec![1], Some(next));

        assert!(page.has_more());

        let merged = page.load_more().unwrap().await.unwrap();
        assert_eq!(merged.items, vec![1, 2]);
        assert!(!merged.has_more());
    }

    #[tokio::test]
    async fn test_load_more_can_be_called_repeatedly() {
        let next: LoadMoreFn<i32> =
            Arc::new(|| Box::pin(async { Ok(Paginated::terminal(vec![9])) }));
        let page = Paginated::new(vec![], Some(next));

        let first = page.load_more().unwrap().await.unwrap();
        let second = page.load_more().unwrap().await.unwrap();
        assert_eq!(first.items, second.items);
    }
}
