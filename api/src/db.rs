use crate::DbPool;

pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        display_name TEXT NOT NULL,
        photo_url    TEXT,
        created_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS tags (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        name   TEXT NOT NULL,
        weight REAL NOT NULL DEFAULT 1.0
    );

    CREATE TABLE IF NOT EXISTS posts (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        title          TEXT NOT NULL,
        location       TEXT NOT NULL,
        description    TEXT NOT NULL,
        image_url      TEXT,
        likes_count    INTEGER NOT NULL DEFAULT 0,
        comments_count INTEGER NOT NULL DEFAULT 0,
        created_at     TEXT NOT NULL DEFAULT (datetime('now')),
        user_id        INTEGER REFERENCES users(id),
        tag_id         INTEGER REFERENCES tags(id)
    );
    CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at);
    CREATE INDEX IF NOT EXISTS idx_posts_tag ON posts(tag_id);

    CREATE TABLE IF NOT EXISTS post_comments (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id    INTEGER NOT NULL REFERENCES posts(id),
        user_id    INTEGER REFERENCES users(id),
        content    TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_post_comments_post ON post_comments(post_id);

    -- Seed default categories if empty. Weight biases the priority score
    -- independent of engagement volume.
    INSERT OR IGNORE INTO tags (id, name, weight) VALUES
        (1, 'Road Damage',   1.5),
        (2, 'Safety Hazard', 2.0),
        (3, 'Sanitation',    1.2),
        (4, 'Water Supply',  1.5),
        (5, 'Streetlight',   1.0),
        (6, 'Other',         1.0);
";
