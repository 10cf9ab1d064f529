//! Catalog management service: authors, publishers, categories, books

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{check_life_dates, Author, AuthorQuery, AuthorShort, CreateAuthor, UpdateAuthor},
        book::{
            Book, BookDetails, BookQuery, BookSearchQuery, BookShort, CreateBook, SearchType,
            UpdateBook,
        },
        category::{Category, CreateCategory, UpdateCategory},
        publisher::{CreatePublisher, Publisher, UpdatePublisher},
        review::average_rating,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ===== Authors =====

    pub async fn list_authors(&self, query: &AuthorQuery) -> AppResult<(Vec<AuthorShort>, i64)> {
        self.repository.authors.list(query).await
    }

    /// Author detail together with their books
    pub async fn get_author(&self, id: i32) -> AppResult<(Author, Vec<BookShort>)> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.authors.books(id).await?;
        Ok((author, books))
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;
        check_life_dates(author.birth_date, author.death_date).map_err(AppError::Validation)?;
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        author.validate()?;

        // Date rules apply to the merged record, not the patch alone
        let current = self.repository.authors.get_by_id(id).await?;
        let birth = author.birth_date.or(current.birth_date);
        let death = author.death_date.or(current.death_date);
        check_life_dates(birth, death).map_err(AppError::Validation)?;

        self.repository.authors.update(id, &author).await
    }

    /// Delete an author; rejected while books still reference them
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        let book_count = self.repository.authors.book_count(id).await?;
        if book_count > 0 {
            return Err(AppError::DependentRecords(format!(
                "Author cannot be deleted: {} book(s) reference them",
                book_count
            )));
        }
        self.repository.authors.delete(id).await
    }

    // ===== Publishers =====

    pub async fn list_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.repository.publishers.list().await
    }

    pub async fn get_publisher(&self, id: i32) -> AppResult<Publisher> {
        self.repository.publishers.get_by_id(id).await
    }

    pub async fn create_publisher(&self, publisher: CreatePublisher) -> AppResult<Publisher> {
        publisher.validate()?;
        self.repository.publishers.create(&publisher).await
    }

    pub async fn update_publisher(
        &self,
        id: i32,
        publisher: UpdatePublisher,
    ) -> AppResult<Publisher> {
        publisher.validate()?;
        self.repository.publishers.update(id, &publisher).await
    }

    /// Delete a publisher; rejected while books still reference it
    pub async fn delete_publisher(&self, id: i32) -> AppResult<()> {
        let book_count = self.repository.publishers.book_count(id).await?;
        if book_count > 0 {
            return Err(AppError::DependentRecords(format!(
                "Publisher cannot be deleted: {} book(s) reference it",
                book_count
            )));
        }
        self.repository.publishers.delete(id).await
    }

    // ===== Categories =====

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn create_category(&self, category: CreateCategory) -> AppResult<Category> {
        category.validate()?;
        self.repository.categories.create(&category).await
    }

    pub async fn update_category(&self, id: i32, category: UpdateCategory) -> AppResult<Category> {
        category.validate()?;
        self.repository.categories.update(id, &category).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }

    // ===== Books =====

    pub async fn list_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(query).await
    }

    /// Search books. The search type is normalized by a total mapping with
    /// `all` as the default; a blank term degrades to the plain listing.
    pub async fn search_books(&self, query: &BookSearchQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let search_type = SearchType::from(query.search_type.as_deref());
        let term = query.q.as_deref().unwrap_or("").trim();

        if term.is_empty() {
            let listing = BookQuery {
                author_id: None,
                sort: None,
                page: query.page,
                per_page: query.per_page,
            };
            return self.repository.books.list(&listing).await;
        }

        self.repository
            .books
            .search(term, search_type, query.page, query.per_page)
            .await
    }

    /// Book detail with relations, reviews and computed average rating
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;
        let author = self.repository.authors.get_by_id(book.author_id).await?;
        let publisher = self
            .repository
            .publishers
            .get_by_id(book.publisher_id)
            .await?;
        let categories = self.repository.books.categories(id).await?;
        let reviews = self.repository.reviews.list_for_book(id).await?;
        let scores: Vec<i16> = reviews.iter().map(|r| r.score).collect();

        Ok(BookDetails {
            book,
            author_name: author.name,
            publisher_name: publisher.name,
            categories,
            average_rating: average_rating(&scores),
            reviews,
        })
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        // Resolve references up front for friendlier errors than raw FK
        // violations
        self.repository.authors.get_by_id(book.author_id).await?;
        self.repository
            .publishers
            .get_by_id(book.publisher_id)
            .await?;
        for category_id in &book.category_ids {
            self.repository.categories.get_by_id(*category_id).await?;
        }
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(publisher_id) = book.publisher_id {
            self.repository.publishers.get_by_id(publisher_id).await?;
        }
        if let Some(ref category_ids) = book.category_ids {
            for category_id in category_ids {
                self.repository.categories.get_by_id(*category_id).await?;
            }
        }
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
