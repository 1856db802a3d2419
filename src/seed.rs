use sea_orm::*;

use crate::models::{
    author, book, book_authors, book_meetings, genre, meeting, member, member_meetings, review,
};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Genres
    let mut genre_ids = Vec::new();
    for (name, description) in [
        ("Science Fiction", Some("Speculative futures and technology")),
        ("Classic", Some("Enduring literary works")),
        ("Fantasy", None),
    ] {
        let genre = genre::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.map(|d| d.to_owned())),
            ..Default::default()
        };
        let res = genre::Entity::insert(genre).exec(db).await?;
        genre_ids.push(res.last_insert_id);
    }

    // 2. Authors
    let mut author_ids = Vec::new();
    for (name, birth_date, nationality) in [
        ("Aldous Huxley", Some("1894-07-26"), Some("British")),
        ("Ursula K. Le Guin", Some("1929-10-21"), Some("American")),
        ("George Orwell", Some("1903-06-25"), Some("British")),
    ] {
        let author = author::ActiveModel {
            name: Set(name.to_owned()),
            birth_date: Set(birth_date.map(|d| d.to_owned())),
            nationality: Set(nationality.map(|n| n.to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let res = author::Entity::insert(author).exec(db).await?;
        author_ids.push(res.last_insert_id);
    }

    // 3. Members
    let mut member_ids = Vec::new();
    for (name, email, role) in [
        ("Alice Reader", "alice@example.com", "Admin"),
        ("Bob Page", "bob@example.com", "Member"),
        ("Carol Spine", "carol@example.com", "Member"),
    ] {
        let member = member::ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            join_date: Set(now.clone()),
            role: Set(role.to_owned()),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let res = member::Entity::insert(member).exec(db).await?;
        member_ids.push(res.last_insert_id);
    }

    // 4. Books
    let mut book_ids = Vec::new();
    for (title, year, genre_idx, author_idx) in [
        ("Brave New World", 1932, 0usize, 0usize),
        ("The Dispossessed", 1974, 0, 1),
        ("Nineteen Eighty-Four", 1949, 1, 2),
    ] {
        let book = book::ActiveModel {
            title: Set(title.to_owned()),
            publication_year: Set(Some(year)),
            genre_id: Set(genre_ids[genre_idx]),
            is_available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        let res = book::Entity::insert(book).exec(db).await?;
        book_ids.push(res.last_insert_id);

        let link = book_authors::ActiveModel {
            book_id: Set(res.last_insert_id),
            author_id: Set(author_ids[author_idx]),
        };
        book_authors::Entity::insert(link).exec(db).await?;
    }

    // 5. Reviews
    for (book_idx, member_idx, rating, comment) in [
        (0usize, 0usize, 5, Some("A favourite, rereads well.")),
        (0, 1, 4, None),
        (2, 1, 5, Some("Bleak and brilliant.")),
    ] {
        let review = review::ActiveModel {
            rating: Set(rating),
            comment: Set(comment.map(|c| c.to_owned())),
            date_posted: Set(now.clone()),
            book_id: Set(book_ids[book_idx]),
            member_id: Set(member_ids[member_idx]),
            ..Default::default()
        };
        review::Entity::insert(review).exec(db).await?;
    }

    // 6. A meeting discussing the first two books
    let meeting = meeting::ActiveModel {
        date: Set(now.clone()),
        location: Set(Some("Community library, room 2".to_owned())),
        notes: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };
    let res = meeting::Entity::insert(meeting).exec(db).await?;
    let meeting_id = res.last_insert_id;

    for book_id in &book_ids[..2] {
        let link = book_meetings::ActiveModel {
            book_id: Set(*book_id),
            meeting_id: Set(meeting_id),
        };
        book_meetings::Entity::insert(link).exec(db).await?;
    }

    for member_id in &member_ids {
        let link = member_meetings::ActiveModel {
            member_id: Set(*member_id),
            meeting_id: Set(meeting_id),
        };
        member_meetings::Entity::insert(link).exec(db).await?;
    }

    Ok(())
}
