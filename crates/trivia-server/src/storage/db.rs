//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use trivia_types::{Category, NewQuestion, Question};

/// Categories installed on first startup, matching the classic trivia set.
const SEED_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        Self::connect(options, 5).await
    }

    /// In-memory database for tests. A single connection keeps all queries
    /// on the same `:memory:` instance.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(SqliteConnectOptions::new().in_memory(true), 1).await
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        Self::seed_categories(&pool)
            .await
            .context("Failed to seed categories")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category INTEGER NOT NULL,
                difficulty INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn seed_categories(pool: &SqlitePool) -> Result<()> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        for label in SEED_CATEGORIES {
            sqlx::query("INSERT INTO categories (type) VALUES (?1)")
                .bind(label)
                .execute(pool)
                .await?;
        }
        tracing::info!("Seeded {} default categories", SEED_CATEGORIES.len());

        Ok(())
    }

    // Category operations

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, type FROM categories ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, type FROM categories WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    // Question operations

    pub async fn list_questions(&self) -> Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn list_questions_by_category(&self, category: i64) -> Result<Vec<Question>> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions WHERE category = ?1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Case-insensitive substring match against the question text.
    ///
    /// `LIKE` metacharacters in the term are escaped so they match literally;
    /// an empty term therefore matches every question.
    pub async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped);

        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions WHERE question LIKE ?1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(pattern)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Insert a question and return its assigned id.
    pub async fn create_question(&self, new: &NewQuestion) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .execute(&*self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Empty out the categories table, for exercising the no-categories path.
    #[cfg(test)]
    pub(crate) async fn clear_categories(&self) -> Result<()> {
        sqlx::query("DELETE FROM categories")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    /// Delete a question inside a transaction. Returns `false` when no row
    /// with that id exists; the transaction rolls back on drop for any
    /// failure mid-operation.
    pub async fn delete_question(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT id FROM questions WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            return Ok(false);
        }

        sqlx::query(
            r#"
            DELETE FROM questions WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category {
            id: r.id,
            kind: r.kind,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

impl From<QuestionRow> for Question {
    fn from(r: QuestionRow) -> Self {
        Question {
            id: r.id,
            question: r.question,
            answer: r.answer,
            category: r.category,
            difficulty: r.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn db_with_questions() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.create_question(&NewQuestion::new(
            "What is the heaviest organ in the human body?",
            "The liver",
            1,
            4,
        ))
        .await
        .unwrap();
        db.create_question(&NewQuestion::new(
            "La Giaconda is better known as what?",
            "Mona Lisa",
            2,
            3,
        ))
        .await
        .unwrap();
        db.create_question(&NewQuestion::new(
            "Hematology is a branch of medicine involving the study of what?",
            "Blood",
            1,
            4,
        ))
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn seeds_default_categories_once() {
        let db = Database::in_memory().await.unwrap();
        let categories = db.list_categories().await.unwrap();
        assert_eq!(categories.len(), SEED_CATEGORIES.len());
        assert_eq!(categories[0].kind, "Science");

        // Re-running the seed against a populated table is a no-op.
        Database::seed_categories(&db.pool).await.unwrap();
        assert_eq!(db.list_categories().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn create_assigns_monotonic_ids() {
        let db = db_with_questions().await;
        let questions = db.list_questions().await.unwrap();
        assert_eq!(questions.len(), 3);
        assert!(questions.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn list_by_category_filters() {
        let db = db_with_questions().await;
        let science = db.list_questions_by_category(1).await.unwrap();
        assert_eq!(science.len(), 2);
        assert!(science.iter().all(|q| q.category == 1));
        assert!(db.list_questions_by_category(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let db = db_with_questions().await;
        let hits = db.search_questions("HEMATOLOGY").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].answer, "Blood");

        assert!(db.search_questions("nonexistent term").await.unwrap().is_empty());

        // Empty term matches everything.
        assert_eq!(db.search_questions("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let db = db_with_questions().await;
        assert!(db.search_questions("%").await.unwrap().is_empty());
        assert!(db.search_questions("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let db = db_with_questions().await;
        let id = db.list_questions().await.unwrap()[0].id;

        assert!(db.delete_question(id).await.unwrap());
        assert_eq!(db.list_questions().await.unwrap().len(), 2);

        // Second delete of the same id reports absence.
        assert!(!db.delete_question(id).await.unwrap());
        assert_eq!(db.list_questions().await.unwrap().len(), 2);
    }
}
