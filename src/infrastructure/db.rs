use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    if database_url.contains(":memory:") {
        // Each pooled connection would open its own empty database
        options.max_connections(1).min_connections(1);
    }
    let db = Database::connect(options).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // References between tables are plain columns: the catalog checks them,
    // the store does not.
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id TEXT PRIMARY KEY NOT NULL,
            first_name TEXT NOT NULL,
            family_name TEXT NOT NULL,
            date_of_birth TEXT,
            date_of_death TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            author_id TEXT NOT NULL,
            summary TEXT NOT NULL,
            isbn TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id TEXT NOT NULL,
            genre_id TEXT NOT NULL,
            PRIMARY KEY (book_id, genre_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS book_instances (
            id TEXT PRIMARY KEY NOT NULL,
            book_id TEXT NOT NULL,
            imprint TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Maintenance',
            due_back TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id)",
        "CREATE INDEX IF NOT EXISTS idx_book_genres_genre_id ON book_genres(genre_id)",
        "CREATE INDEX IF NOT EXISTS idx_book_instances_book_id ON book_instances(book_id)",
        "CREATE INDEX IF NOT EXISTS idx_genres_name ON genres(name)",
    ];

    for sql in statements {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_owned(),
        ))
        .await?;
    }

    tracing::debug!("Catalog schema is up to date");
    Ok(())
}
