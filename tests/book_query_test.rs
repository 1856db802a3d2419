use bookclub::db;
use bookclub::models::{author, book, book_authors, genre, member, review};
use bookclub::services::book_service::{self, BookFilter};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_genre(db: &DatabaseConnection, name: &str) -> i32 {
    let genre = genre::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    genre::Entity::insert(genre)
        .exec(db)
        .await
        .expect("Failed to create genre")
        .last_insert_id
}

async fn create_test_author(db: &DatabaseConnection, name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let author = author::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    author::Entity::insert(author)
        .exec(db)
        .await
        .expect("Failed to create author")
        .last_insert_id
}

async fn create_test_member(db: &DatabaseConnection, name: &str, email: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let member = member::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        join_date: Set(now.clone()),
        role: Set("Member".to_string()),
        is_active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    member::Entity::insert(member)
        .exec(db)
        .await
        .expect("Failed to create member")
        .last_insert_id
}

async fn create_test_book(
    db: &DatabaseConnection,
    title: &str,
    genre_id: i32,
    year: Option<i32>,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let book = book::ActiveModel {
        title: Set(title.to_string()),
        publication_year: Set(year),
        genre_id: Set(genre_id),
        is_available: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    book::Entity::insert(book)
        .exec(db)
        .await
        .expect("Failed to create book")
        .last_insert_id
}

async fn link_author(db: &DatabaseConnection, book_id: i32, author_id: i32) {
    let link = book_authors::ActiveModel {
        book_id: Set(book_id),
        author_id: Set(author_id),
    };
    book_authors::Entity::insert(link)
        .exec(db)
        .await
        .expect("Failed to link author");
}

async fn create_test_review(db: &DatabaseConnection, book_id: i32, member_id: i32, rating: i32) {
    let review = review::ActiveModel {
        rating: Set(rating),
        date_posted: Set(chrono::Utc::now().to_rfc3339()),
        book_id: Set(book_id),
        member_id: Set(member_id),
        ..Default::default()
    };
    review::Entity::insert(review)
        .exec(db)
        .await
        .expect("Failed to create review");
}

#[tokio::test]
async fn average_rating_is_mean_of_reviews_or_zero() {
    let db = setup_test_db().await;
    let genre_id = create_test_genre(&db, "Science Fiction").await;
    let member_id = create_test_member(&db, "Alice", "alice@example.com").await;

    let rated = create_test_book(&db, "Brave New World", genre_id, Some(1932)).await;
    let unrated = create_test_book(&db, "The Dispossessed", genre_id, Some(1974)).await;

    create_test_review(&db, rated, member_id, 4).await;
    create_test_review(&db, rated, member_id, 5).await;

    let book = book_service::get_book(&db, rated).await.expect("get failed");
    assert_eq!(book.average_rating, 4.5);
    assert_eq!(book.reviews.len(), 2);

    let book = book_service::get_book(&db, unrated)
        .await
        .expect("get failed");
    assert_eq!(book.average_rating, 0.0);
    assert!(book.reviews.is_empty());
}

#[tokio::test]
async fn search_matches_title_or_author_name() {
    let db = setup_test_db().await;
    let genre_id = create_test_genre(&db, "Classic").await;

    let huxley = create_test_author(&db, "Aldous Huxley").await;
    let orwell = create_test_author(&db, "George Orwell").await;

    let brave = create_test_book(&db, "Brave New World", genre_id, Some(1932)).await;
    let nef = create_test_book(&db, "Nineteen Eighty-Four", genre_id, Some(1949)).await;
    link_author(&db, brave, huxley).await;
    link_author(&db, nef, orwell).await;

    let books = book_service::list_books(
        &db,
        BookFilter {
            search: Some("Brave".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, Some(brave));

    // Author-name match is case-insensitive
    let books = book_service::list_books(
        &db,
        BookFilter {
            search: Some("orwell".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, Some(nef));
}

#[tokio::test]
async fn search_and_genre_filters_are_anded() {
    let db = setup_test_db().await;
    let sf = create_test_genre(&db, "Science Fiction").await;
    let classic = create_test_genre(&db, "Classic").await;

    let a = create_test_book(&db, "New Atlantis", sf, None).await;
    create_test_book(&db, "New Grub Street", classic, None).await;

    let books = book_service::list_books(
        &db,
        BookFilter {
            search: Some("New".to_string()),
            genre_id: Some(sf),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, Some(a));
}

#[tokio::test]
async fn rating_sort_is_descending_and_ties_keep_creation_order() {
    let db = setup_test_db().await;
    let genre_id = create_test_genre(&db, "Fantasy").await;
    let member_id = create_test_member(&db, "Bob", "bob@example.com").await;

    let low_a = create_test_book(&db, "Zeta", genre_id, None).await;
    let high = create_test_book(&db, "Alpha", genre_id, None).await;
    let low_b = create_test_book(&db, "Midway", genre_id, None).await;

    create_test_review(&db, low_a, member_id, 3).await;
    create_test_review(&db, high, member_id, 5).await;
    create_test_review(&db, low_b, member_id, 3).await;

    let books = book_service::list_books(
        &db,
        BookFilter {
            sort: Some("rating".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    let ids: Vec<i32> = books.iter().filter_map(|b| b.id).collect();
    assert_eq!(ids, vec![high, low_a, low_b]);
}

#[tokio::test]
async fn year_sort_puts_missing_years_last() {
    let db = setup_test_db().await;
    let genre_id = create_test_genre(&db, "Classic").await;

    let undated = create_test_book(&db, "Fragments", genre_id, None).await;
    let old = create_test_book(&db, "Utopia", genre_id, Some(1516)).await;
    let recent = create_test_book(&db, "Exhalation", genre_id, Some(2019)).await;

    let books = book_service::list_books(
        &db,
        BookFilter {
            sort: Some("year".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    let ids: Vec<i32> = books.iter().filter_map(|b| b.id).collect();
    assert_eq!(ids, vec![recent, old, undated]);
}

#[tokio::test]
async fn default_sort_is_title_ascending_and_newest_reverses_creation() {
    let db = setup_test_db().await;
    let genre_id = create_test_genre(&db, "Classic").await;

    let c = create_test_book(&db, "Carmilla", genre_id, None).await;
    let a = create_test_book(&db, "Aurora", genre_id, None).await;
    let b = create_test_book(&db, "Blindsight", genre_id, None).await;

    let books = book_service::list_books(&db, BookFilter::default())
        .await
        .expect("list failed");
    let ids: Vec<i32> = books.iter().filter_map(|x| x.id).collect();
    assert_eq!(ids, vec![a, b, c]);

    let books = book_service::list_books(
        &db,
        BookFilter {
            sort: Some("newest".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");
    let ids: Vec<i32> = books.iter().filter_map(|x| x.id).collect();
    assert_eq!(ids, vec![b, a, c]);
}

#[tokio::test]
async fn top_rated_takes_the_highest_rated_books() {
    let db = setup_test_db().await;
    let genre_id = create_test_genre(&db, "Science Fiction").await;
    let member_id = create_test_member(&db, "Carol", "carol@example.com").await;

    for (title, rating) in [("One", 2), ("Two", 5), ("Three", 4), ("Four", 3)] {
        let id = create_test_book(&db, title, genre_id, None).await;
        create_test_review(&db, id, member_id, rating).await;
    }

    let books = book_service::top_rated(&db, Some(3)).await.expect("top rated failed");
    assert_eq!(books.len(), 3);

    let ratings: Vec<f64> = books.iter().map(|b| b.average_rating).collect();
    assert_eq!(ratings, vec![5.0, 4.0, 3.0]);
}

#[tokio::test]
async fn by_genre_matches_the_filtered_listing() {
    let db = setup_test_db().await;
    let sf = create_test_genre(&db, "Science Fiction").await;
    let classic = create_test_genre(&db, "Classic").await;
    let member_id = create_test_member(&db, "Dora", "dora@example.com").await;

    let a = create_test_book(&db, "Solaris", sf, Some(1961)).await;
    let b = create_test_book(&db, "Roadside Picnic", sf, Some(1972)).await;
    create_test_book(&db, "Middlemarch", classic, Some(1871)).await;
    create_test_review(&db, a, member_id, 4).await;

    let by_genre = book_service::by_genre(&db, sf).await.expect("by_genre failed");
    let listed = book_service::list_books(
        &db,
        BookFilter {
            genre_id: Some(sf),
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    let by_genre_ids: Vec<i32> = by_genre.iter().filter_map(|x| x.id).collect();
    let listed_ids: Vec<i32> = listed.iter().filter_map(|x| x.id).collect();
    assert_eq!(by_genre_ids, listed_ids);
    assert!(by_genre_ids.contains(&a) && by_genre_ids.contains(&b));

    let rated = by_genre.iter().find(|x| x.id == Some(a)).unwrap();
    assert_eq!(rated.average_rating, 4.0);
}
