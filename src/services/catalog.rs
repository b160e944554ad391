//! Catalog browsing

use std::sync::Arc;

use crate::{
    api::LibraryApi,
    error::AppResult,
    fetch::Fetch,
    models::{Book, BookQuery, Specimen},
    store::EntityList,
};

#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn LibraryApi>,
    books: EntityList<Book>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn LibraryApi>, books: EntityList<Book>) -> Self {
        Self { api, books }
    }

    pub fn books(&self) -> &EntityList<Book> {
        &self.books
    }

    /// Search the catalog and replace the cached book list
    pub async fn load_books(&self, query: &BookQuery) -> AppResult<usize> {
        super::load_into(&self.books, "books", self.api.list_books(query)).await
    }

    /// Copies of one title, fetched for the view that shows them
    pub fn specimens(&self, book_id: i32) -> Fetch<Vec<Specimen>> {
        let api = Arc::clone(&self.api);
        Fetch::start("specimens", async move { api.list_specimens(book_id).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::MockLibraryApi, error::AppError, store::Store};

    fn book(id: i32, title: &str) -> Book {
        Book {
            id,
            title: Some(title.to_string()),
            isbn: None,
            media_type: None,
            publisher: None,
            publication_date: None,
            authors: Vec::new(),
            nb_specimens: Some(1),
            nb_available: Some(1),
        }
    }

    #[tokio::test]
    async fn test_load_books_passes_query() {
        let mut api = MockLibraryApi::new();
        api.expect_list_books()
            .withf(|query| query.title.as_deref() == Some("dune"))
            .times(1)
            .returning(|_| Ok(vec![book(1, "Dune"), book(2, "Dune Messiah")]));

        let catalog = CatalogService::new(Arc::new(api), Store::default());
        let query = BookQuery {
            title: Some("dune".to_string()),
            ..Default::default()
        };
        assert_eq!(catalog.load_books(&query).await.unwrap(), 2);

        let state = catalog.books().state();
        assert_eq!(state.entities[1].title.as_deref(), Some("Dune Messiah"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_transport_failure_sets_error() {
        let mut api = MockLibraryApi::new();
        api.expect_list_books().returning(|_| {
            Err(AppError::from_status(502, "upstream unavailable"))
        });

        let catalog = CatalogService::new(Arc::new(api), Store::default());
        tokio_test::assert_err!(catalog.load_books(&BookQuery::default()).await);

        let state = catalog.books().state();
        assert!(state.error.is_some());
        assert_eq!(state.response, None);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_specimens_fetch_issues_one_request() {
        let mut api = MockLibraryApi::new();
        api.expect_list_specimens()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| {
                Ok(vec![Specimen {
                    id: 30,
                    barcode: Some("B-30".to_string()),
                    call_number: None,
                    status: Some(98),
                    availability: Some(0),
                    book: None,
                }])
            });

        let catalog = CatalogService::new(Arc::new(api), Store::default());
        let mut fetch = catalog.specimens(3);
        let state = fetch.settled().await;
        assert_eq!(state.data.len(), 1);
        assert!(state.data[0].can_borrow());
        // the book list is untouched by ad-hoc fetches
        assert!(catalog.books().state().entities.is_empty());
    }
}
