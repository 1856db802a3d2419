//! Book service - catalog queries, rating aggregation and cascade deletion.
//!
//! Every read path that returns a book goes through [`with_relations`], so
//! the derived average rating is recomputed from the live review rows on
//! each read and can never be skipped on a single call site.

use std::cmp::Ordering;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::DomainError;
use crate::models::Book;
use crate::models::book::{self, ActiveModel as BookActiveModel, Column, Entity as BookEntity};
use crate::models::{author, book_authors, book_meetings, genre, review};
use crate::services::associations;

/// Filter parameters for listing books
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub search: Option<String>,
    pub genre_id: Option<i32>,
    pub sort: Option<String>,
}

/// Mean of the attached review ratings, 0.0 for a book with no reviews.
pub fn average_rating(reviews: &[review::Model]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    sum as f64 / reviews.len() as f64
}

async fn with_relations(
    db: &DatabaseConnection,
    model: book::Model,
) -> Result<Book, DomainError> {
    let genre = model.find_related(genre::Entity).one(db).await?;
    let authors = model.find_related(author::Entity).all(db).await?;
    let reviews = model.find_related(review::Entity).all(db).await?;

    let mut dto = Book::from(model);
    dto.average_rating = average_rating(&reviews);
    dto.genre = genre;
    dto.authors = authors;
    dto.reviews = reviews;
    Ok(dto)
}

/// List books with genre, authors and reviews attached.
///
/// The search filter matches case-insensitively against the title or any
/// associated author's name. Filters are ANDed; ratings are computed after
/// filtering and before sorting.
pub async fn list_books(
    db: &DatabaseConnection,
    filter: BookFilter,
) -> Result<Vec<Book>, DomainError> {
    tracing::info!(
        "List books - search={:?}, genre_id={:?}, sort={:?}",
        filter.search,
        filter.genre_id,
        filter.sort
    );

    let mut query = BookEntity::find();

    if let Some(genre_id) = filter.genre_id {
        query = query.filter(Column::GenreId.eq(genre_id));
    }

    let models = query.order_by_asc(Column::Id).all(db).await?;

    let mut books = Vec::with_capacity(models.len());
    for model in models {
        books.push(with_relations(db, model).await?);
    }

    if let Some(search) = &filter.search
        && !search.is_empty()
    {
        let needle = search.to_lowercase();
        books.retain(|b| {
            b.title.to_lowercase().contains(&needle)
                || b.authors
                    .iter()
                    .any(|a| a.name.to_lowercase().contains(&needle))
        });
    }

    sort_books(&mut books, filter.sort.as_deref());

    tracing::info!("Returning {} books after filters", books.len());
    Ok(books)
}

// The pre-sort order is creation order (id ascending) and sort_by is
// stable, so ties keep creation order. Missing publication years sort last.
fn sort_books(books: &mut [Book], sort: Option<&str>) {
    match sort {
        Some("rating") => books.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
        }),
        Some("year") => books.sort_by(|a, b| b.publication_year.cmp(&a.publication_year)),
        Some("newest") => books.sort_by(|a, b| b.id.cmp(&a.id)),
        _ => books.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// The `count` highest-rated books, default 10.
pub async fn top_rated(
    db: &DatabaseConnection,
    count: Option<usize>,
) -> Result<Vec<Book>, DomainError> {
    let mut books = list_books(
        db,
        BookFilter {
            sort: Some("rating".to_string()),
            ..Default::default()
        },
    )
    .await?;
    books.truncate(count.unwrap_or(10));
    Ok(books)
}

/// Books in one genre, aggregated and ordered like the plain listing.
pub async fn by_genre(db: &DatabaseConnection, genre_id: i32) -> Result<Vec<Book>, DomainError> {
    list_books(
        db,
        BookFilter {
            genre_id: Some(genre_id),
            ..Default::default()
        },
    )
    .await
}

/// Get a single book by ID with genre, authors and reviews attached.
pub async fn get_book(db: &DatabaseConnection, id: i32) -> Result<Book, DomainError> {
    let model = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    with_relations(db, model).await
}

fn validate(book: &Book) -> Result<(), DomainError> {
    if book.title.trim().is_empty() {
        return Err(DomainError::Validation("title is required".to_string()));
    }
    if book.title.len() > 255 {
        return Err(DomainError::Validation(
            "title must be at most 255 characters".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_genre(db: &DatabaseConnection, genre_id: i32) -> Result<(), DomainError> {
    genre::Entity::find_by_id(genre_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| DomainError::Integrity(format!("genre {} does not exist", genre_id)))
}

/// Create a new book
pub async fn create_book(db: &DatabaseConnection, book: Book) -> Result<Book, DomainError> {
    validate(&book)?;
    ensure_genre(db, book.genre_id).await?;

    let now = chrono::Utc::now().to_rfc3339();

    let new_book = BookActiveModel {
        title: Set(book.title.clone()),
        publication_year: Set(book.publication_year),
        page_count: Set(book.page_count),
        isbn: Set(book.isbn.clone()),
        genre_id: Set(book.genre_id),
        description: Set(book.description.clone()),
        cover_image_url: Set(book.cover_image_url.clone()),
        is_available: Set(book.is_available.unwrap_or(true)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_book.insert(db).await?;
    tracing::info!("Created book {} ({})", model.id, model.title);

    with_relations(db, model).await
}

/// Update an existing book. All mutable fields are overwritten; omitted
/// optional fields are cleared.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    book: Book,
) -> Result<Book, DomainError> {
    validate(&book)?;

    let existing = BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    ensure_genre(db, book.genre_id).await?;

    let mut active: BookActiveModel = existing.into();
    active.title = Set(book.title);
    active.publication_year = Set(book.publication_year);
    active.page_count = Set(book.page_count);
    active.isbn = Set(book.isbn);
    active.genre_id = Set(book.genre_id);
    active.description = Set(book.description);
    active.cover_image_url = Set(book.cover_image_url);
    active.is_available = Set(book.is_available.unwrap_or(true));
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = active.update(db).await?;
    with_relations(db, model).await
}

/// Replace the book's author list
pub async fn replace_authors(
    db: &DatabaseConnection,
    book_id: i32,
    author_ids: Vec<i32>,
) -> Result<Book, DomainError> {
    let model = BookEntity::find_by_id(book_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;
    associations::replace_book_authors(&txn, book_id, &author_ids).await?;
    txn.commit().await?;

    with_relations(db, model).await
}

/// Delete a book and its dependent rows: author links, reviews and meeting
/// links go first, then the book itself.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    BookEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;

    book_authors::Entity::delete_many()
        .filter(book_authors::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    review::Entity::delete_many()
        .filter(review::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    book_meetings::Entity::delete_many()
        .filter(book_meetings::Column::BookId.eq(id))
        .exec(&txn)
        .await?;
    BookEntity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!("Deleted book {} and its dependent rows", id);
    Ok(())
}
