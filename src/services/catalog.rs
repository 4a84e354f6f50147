//! Catalog (books) management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
    services::require_non_blank,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Find book by ISBN
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.repository.books.find_by_isbn(isbn).await
    }

    /// Add a new book to the catalog
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        require_non_blank(&book.isbn, "ISBN is required")?;
        require_non_blank(&book.title, "Title is required")?;
        require_non_blank(&book.author, "Author is required")?;

        if self.repository.books.isbn_exists(&book.isbn, None).await? {
            return Err(AppError::Duplicate(format!(
                "ISBN already exists in the system: {}",
                book.isbn
            )));
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Book created: id={} isbn={}", created.id, created.isbn);
        Ok(created)
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        require_non_blank(&book.isbn, "ISBN is required")?;
        require_non_blank(&book.title, "Title is required")?;
        require_non_blank(&book.author, "Author is required")?;

        if self.repository.books.isbn_exists(&book.isbn, Some(id)).await? {
            return Err(AppError::Duplicate(format!(
                "ISBN already exists in the system: {}",
                book.isbn
            )));
        }

        if book.available_copies > book.total_copies {
            return Err(AppError::Validation(
                "Available copies cannot be greater than total copies".to_string(),
            ));
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book, unless copies are still out on loan
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        let book = self.repository.books.get_by_id(id).await?;

        if book.available_copies < book.total_copies {
            return Err(AppError::Conflict(
                "Cannot delete the book because it has borrowed copies".to_string(),
            ));
        }

        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={} isbn={}", id, book.isbn);
        Ok(())
    }

    /// True iff the book exists and has at least one copy on the shelf
    pub async fn is_available_for_loan(&self, book_id: i32) -> AppResult<bool> {
        match self.repository.books.get_by_id(book_id).await {
            Ok(book) => Ok(book.is_available()),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
