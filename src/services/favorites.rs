//! Favorites service: bookmarking books and following authors

use crate::{
    error::AppResult,
    models::{
        author::AuthorShort,
        book::BookShort,
        favorite::{FavorableKind, Favorite, FavoriteBookStats, FollowedAuthorStats},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct FavoritesService {
    repository: Repository,
}

impl FavoritesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Favorite a book or author. The target must exist; a duplicate pair
    /// is rejected with a conflict.
    pub async fn add(
        &self,
        user_id: i32,
        kind: FavorableKind,
        favorable_id: i32,
    ) -> AppResult<Favorite> {
        // Explicit dispatch on the favorable kind
        match kind {
            FavorableKind::Author => {
                self.repository.authors.get_by_id(favorable_id).await?;
            }
            FavorableKind::Book => {
                self.repository.books.get_by_id(favorable_id).await?;
            }
        }

        self.repository.favorites.add(user_id, kind, favorable_id).await
    }

    /// Remove a favorite; reports not-found when the pair does not exist
    pub async fn remove(
        &self,
        user_id: i32,
        kind: FavorableKind,
        favorable_id: i32,
    ) -> AppResult<()> {
        self.repository
            .favorites
            .remove(user_id, kind, favorable_id)
            .await
    }

    /// A user's favorite books with summary stats
    pub async fn favorite_books(
        &self,
        user_id: i32,
    ) -> AppResult<(Vec<BookShort>, FavoriteBookStats)> {
        let books = self.repository.favorites.favorite_books(user_id).await?;
        let stats = self
            .repository
            .favorites
            .favorite_book_stats(user_id)
            .await?;
        Ok((books, stats))
    }

    /// Authors a user follows with summary stats
    pub async fn followed_authors(
        &self,
        user_id: i32,
    ) -> AppResult<(Vec<AuthorShort>, FollowedAuthorStats)> {
        let authors = self.repository.favorites.followed_authors(user_id).await?;

        let total_books: i64 = authors.iter().map(|a| a.book_count).sum();
        let avg_books = if authors.is_empty() {
            0.0
        } else {
            let avg = total_books as f64 / authors.len() as f64;
            (avg * 10.0).round() / 10.0
        };

        Ok((
            authors,
            FollowedAuthorStats {
                total_books,
                avg_books,
            },
        ))
    }
}
