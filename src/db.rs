use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create genres table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create authors table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            birth_date TEXT,
            nationality TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create members table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            join_date TEXT NOT NULL,
            phone TEXT,
            role TEXT NOT NULL DEFAULT 'Member',
            bio TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create meetings table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            location TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create books table. Referential actions are enforced by the service
    // layer, so the schema declares no cascades.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            publication_year INTEGER,
            page_count INTEGER,
            isbn TEXT,
            genre_id INTEGER NOT NULL,
            review_count INTEGER NOT NULL DEFAULT 0,
            description TEXT,
            cover_image_url TEXT,
            is_available INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_books_genre_id ON books(genre_id)".to_owned(),
    ))
    .await?;

    // Create reviews table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            rating INTEGER NOT NULL,
            comment TEXT,
            date_posted TEXT NOT NULL,
            book_id INTEGER NOT NULL,
            member_id INTEGER NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_reviews_book_id ON reviews(book_id)".to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_reviews_member_id ON reviews(member_id)".to_owned(),
    ))
    .await?;

    // Create book_authors junction table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS book_authors (
            book_id INTEGER NOT NULL,
            author_id INTEGER NOT NULL,
            PRIMARY KEY (book_id, author_id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create book_meetings junction table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS book_meetings (
            book_id INTEGER NOT NULL,
            meeting_id INTEGER NOT NULL,
            PRIMARY KEY (book_id, meeting_id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_book_meetings_meeting_id ON book_meetings(meeting_id)"
            .to_owned(),
    ))
    .await?;

    // Create member_meetings junction table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS member_meetings (
            member_id INTEGER NOT NULL,
            meeting_id INTEGER NOT NULL,
            PRIMARY KEY (member_id, meeting_id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_member_meetings_meeting_id ON member_meetings(meeting_id)"
            .to_owned(),
    ))
    .await?;

    // books.review_count is written only by these triggers. Aggregates are
    // always computed from the review rows, never from this counter.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_review_count_insert
        AFTER INSERT ON reviews
        BEGIN
            UPDATE books
            SET review_count = (SELECT COUNT(*) FROM reviews WHERE book_id = NEW.book_id)
            WHERE id = NEW.book_id;
        END
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TRIGGER IF NOT EXISTS trg_review_count_delete
        AFTER DELETE ON reviews
        BEGIN
            UPDATE books
            SET review_count = (SELECT COUNT(*) FROM reviews WHERE book_id = OLD.book_id)
            WHERE id = OLD.book_id;
        END
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
