//! Cursor driven pagination over a [`QueryPageSource`].
//!
//! A [`Paginator`] fetches one page per pull and hands it to the caller before
//! asking the store for the next one, so a scan never has more than one
//! request in flight. [`pages`] exposes the same thing as a `Stream`, and
//! [`list_all`] drains it into a single `Vec`.

use crate::core::{Cursor, Item, QueryPageSource, QueryParameters};
use crate::error::Error;
use futures::{pin_mut, Stream, TryStreamExt};

#[derive(Debug)]
enum State {
    Start,
    HasPage(Cursor),
    Done,
    Failed,
}

/// Pull based walk over every page of one partition.
///
/// Not restartable: once `Done` or `Failed`, every further pull returns
/// `Ok(None)` without touching the store.
#[derive(Debug)]
pub struct Paginator<'a, S: QueryPageSource + ?Sized> {
    source: &'a S,
    query: &'a QueryParameters,
    state: State,
}

impl<'a, S: QueryPageSource + ?Sized> Paginator<'a, S> {
    pub fn new(source: &'a S, query: &'a QueryParameters) -> Self {
        Self {
            source,
            query,
            state: State::Start,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done | State::Failed)
    }

    /// Fetches until a non-empty page turns up or the store runs out.
    ///
    /// Empty pages are followed but never returned: the store answers an
    /// empty partition with an empty page, and may hand back an empty last
    /// page that still carries a cursor.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Item>>, Error> {
        loop {
            let cursor = match &self.state {
                State::Start => None,
                State::HasPage(cursor) => Some(cursor.clone()),
                State::Done | State::Failed => return Ok(None),
            };

            // a fetch dropped before it resolves leaves the state untouched
            let page = match self
                .source
                .fetch_page(
                    self.query.partition_key_value(),
                    self.query.page_size_limit(),
                    cursor,
                )
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    self.state = State::Failed;
                    return Err(e);
                }
            };

            self.state = match page.next_cursor {
                Some(cursor) => State::HasPage(cursor),
                None => State::Done,
            };

            if !page.items.is_empty() {
                return Ok(Some(page.items));
            }
            if self.is_finished() {
                return Ok(None);
            }
        }
    }
}

/// Lazy sequence of item pages for one partition.
///
/// The stream ends after the first error it yields.
pub fn pages<'a, S: QueryPageSource + ?Sized>(
    source: &'a S,
    query: &'a QueryParameters,
) -> impl Stream<Item = Result<Vec<Item>, Error>> + 'a {
    async_stream::stream! {
        let mut paginator = Paginator::new(source, query);
        loop {
            match paginator.next_page().await {
                Ok(Some(items)) => yield Ok(items),
                Ok(None) => break,
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    }
}

/// Drains [`pages`] and concatenates them in the order they were yielded.
pub async fn list_all<S: QueryPageSource + ?Sized>(
    source: &S,
    query: &QueryParameters,
) -> Result<Vec<Item>, Error> {
    let pages = pages(source, query);
    pin_mut!(pages);

    let mut all = Vec::new();
    while let Some(page) = pages.try_next().await? {
        all.extend(page);
    }
    Ok(all)
}
