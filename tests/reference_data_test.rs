use bookclub::db;
use bookclub::domain::DomainError;
use bookclub::models::{Book, Review, book, book_authors, genre, member};
use bookclub::services::{
    author_service::{self, AuthorInput},
    book_service, genre_service,
    genre_service::GenreInput,
    review_service,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_member(db: &DatabaseConnection, email: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    member::Entity::insert(member::ActiveModel {
        name: Set("Reader".to_string()),
        email: Set(email.to_string()),
        join_date: Set(now.clone()),
        role: Set("Member".to_string()),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    })
    .exec(db)
    .await
    .expect("Failed to create member")
    .last_insert_id
}

fn new_book(title: &str, genre_id: i32) -> Book {
    Book {
        id: None,
        title: title.to_string(),
        publication_year: None,
        page_count: None,
        isbn: None,
        genre_id,
        review_count: 0,
        description: None,
        cover_image_url: None,
        is_available: None,
        average_rating: 0.0,
        genre: None,
        authors: Vec::new(),
        reviews: Vec::new(),
    }
}

fn new_review(book_id: i32, member_id: i32, rating: i32) -> Review {
    Review {
        id: None,
        rating,
        comment: None,
        date_posted: None,
        book_id,
        member_id,
    }
}

#[tokio::test]
async fn review_rating_must_be_within_range() {
    let db = setup_test_db().await;
    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let member_id = create_test_member(&db, "alice@example.com").await;
    let book = book_service::create_book(&db, new_book("Emma", genre.id))
        .await
        .expect("create book failed");
    let book_id = book.id.unwrap();

    for rating in [0, 6, -1] {
        let result =
            review_service::create_review(&db, new_review(book_id, member_id, rating)).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    let review = review_service::create_review(&db, new_review(book_id, member_id, 5))
        .await
        .expect("create review failed");
    assert!(review.date_posted.is_some());

    let result = review_service::update_review(&db, review.id.unwrap(), 9, None).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn review_requires_existing_book_and_member() {
    let db = setup_test_db().await;
    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let member_id = create_test_member(&db, "bob@example.com").await;
    let book = book_service::create_book(&db, new_book("Emma", genre.id))
        .await
        .expect("create book failed");

    let result = review_service::create_review(&db, new_review(999, member_id, 4)).await;
    assert!(matches!(result, Err(DomainError::Integrity(_))));

    let result = review_service::create_review(&db, new_review(book.id.unwrap(), 999, 4)).await;
    assert!(matches!(result, Err(DomainError::Integrity(_))));
}

#[tokio::test]
async fn book_creation_requires_an_existing_genre() {
    let db = setup_test_db().await;

    let result = book_service::create_book(&db, new_book("Orphaned", 42)).await;
    assert!(matches!(result, Err(DomainError::Integrity(_))));

    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let book = book_service::create_book(&db, new_book("Adopted", genre.id))
        .await
        .expect("create book failed");

    // Retargeting an update at a missing genre is rejected too
    let result = book_service::update_book(&db, book.id.unwrap(), new_book("Adopted", 42)).await;
    assert!(matches!(result, Err(DomainError::Integrity(_))));
}

#[tokio::test]
async fn genre_deletion_is_blocked_while_books_remain() {
    let db = setup_test_db().await;
    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let book = book_service::create_book(&db, new_book("Emma", genre.id))
        .await
        .expect("create book failed");

    let result = genre_service::delete_genre(&db, genre.id).await;
    assert!(matches!(result, Err(DomainError::Integrity(_))));
    assert!(genre::Entity::find_by_id(genre.id)
        .one(&db)
        .await
        .unwrap()
        .is_some());

    book_service::delete_book(&db, book.id.unwrap())
        .await
        .expect("delete book failed");
    genre_service::delete_genre(&db, genre.id)
        .await
        .expect("delete genre failed");
}

#[tokio::test]
async fn author_deletion_removes_junction_rows_only() {
    let db = setup_test_db().await;
    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let author = author_service::create_author(
        &db,
        AuthorInput {
            name: "Jane Austen".to_string(),
            birth_date: Some("1775-12-16".to_string()),
            nationality: Some("British".to_string()),
        },
    )
    .await
    .expect("create author failed");
    let book = book_service::create_book(&db, new_book("Emma", genre.id))
        .await
        .expect("create book failed");
    let book_id = book.id.unwrap();

    let book = book_service::replace_authors(&db, book_id, vec![author.id])
        .await
        .expect("replace authors failed");
    assert_eq!(book.authors.len(), 1);

    author_service::delete_author(&db, author.id)
        .await
        .expect("delete author failed");

    let links = book_authors::Entity::find()
        .filter(book_authors::Column::AuthorId.eq(author.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(links, 0);
    assert!(book::Entity::find_by_id(book_id)
        .one(&db)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn replace_authors_rejects_unknown_ids() {
    let db = setup_test_db().await;
    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let book = book_service::create_book(&db, new_book("Emma", genre.id))
        .await
        .expect("create book failed");

    let result = book_service::replace_authors(&db, book.id.unwrap(), vec![777]).await;
    assert!(matches!(result, Err(DomainError::Integrity(_))));
}

#[tokio::test]
async fn review_count_is_maintained_by_the_trigger() {
    let db = setup_test_db().await;
    let genre = genre_service::create_genre(
        &db,
        GenreInput {
            name: "Classic".to_string(),
            description: None,
        },
    )
    .await
    .expect("create genre failed");
    let member_id = create_test_member(&db, "carol@example.com").await;
    let book = book_service::create_book(&db, new_book("Emma", genre.id))
        .await
        .expect("create book failed");
    let book_id = book.id.unwrap();

    review_service::create_review(&db, new_review(book_id, member_id, 4))
        .await
        .expect("create review failed");
    let second = review_service::create_review(&db, new_review(book_id, member_id, 2))
        .await
        .expect("create review failed");

    let row = book::Entity::find_by_id(book_id).one(&db).await.unwrap().unwrap();
    assert_eq!(row.review_count, 2);

    review_service::delete_review(&db, second.id.unwrap())
        .await
        .expect("delete review failed");
    let row = book::Entity::find_by_id(book_id).one(&db).await.unwrap().unwrap();
    assert_eq!(row.review_count, 1);

    // The aggregate comes from the live rows, not the counter
    let book = book_service::get_book(&db, book_id).await.expect("get failed");
    assert_eq!(book.average_rating, 4.0);
}

#[tokio::test]
async fn genre_name_is_validated() {
    let db = setup_test_db().await;

    let result = genre_service::create_genre(
        &db,
        GenreInput {
            name: "".to_string(),
            description: None,
        },
    )
    .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let result = genre_service::create_genre(
        &db,
        GenreInput {
            name: "g".repeat(101),
            description: None,
        },
    )
    .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn author_crud_roundtrip() {
    let db = setup_test_db().await;

    let author = author_service::create_author(
        &db,
        AuthorInput {
            name: "Mary Shelley".to_string(),
            birth_date: None,
            nationality: None,
        },
    )
    .await
    .expect("create author failed");

    let updated = author_service::update_author(
        &db,
        author.id,
        AuthorInput {
            name: "Mary Wollstonecraft Shelley".to_string(),
            birth_date: Some("1797-08-30".to_string()),
            nationality: Some("British".to_string()),
        },
    )
    .await
    .expect("update author failed");
    assert_eq!(updated.name, "Mary Wollstonecraft Shelley");

    let all = author_service::list_authors(&db).await.expect("list failed");
    assert_eq!(all.len(), 1);

    assert!(matches!(
        author_service::get_author(&db, 999).await,
        Err(DomainError::NotFound)
    ));
}
