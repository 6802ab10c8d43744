// src/db/board_repo.rs
// Avisos e biblioteca.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::board::{LibraryPage, Notice, NoticeAudience},
};

#[derive(Clone)]
pub struct BoardRepository {
    pool: PgPool,
}

impl BoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  AVISOS
    // =========================================================================

    pub async fn create_notice(
        &self,
        title: &str,
        audience: NoticeAudience,
        body: &str,
    ) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notices (title, audience, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(audience)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(notice)
    }

    pub async fn list_notices(&self) -> Result<Vec<Notice>, AppError> {
        let notices =
            sqlx::query_as::<_, Notice>("SELECT * FROM notices ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(notices)
    }

    /// Avisos ativos visíveis para um público (aluno vê "all" + "students").
    pub async fn list_active_notices_for(
        &self,
        audience: NoticeAudience,
    ) -> Result<Vec<Notice>, AppError> {
        let notices = sqlx::query_as::<_, Notice>(
            r#"
            SELECT * FROM notices
            WHERE active = TRUE AND (audience = $1 OR audience = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(NoticeAudience::All)
        .bind(audience)
        .fetch_all(&self.pool)
        .await?;

        Ok(notices)
    }

    pub async fn toggle_notice(&self, id: Uuid) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(
            "UPDATE notices SET active = NOT active, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Aviso"))?;

        Ok(notice)
    }

    // =========================================================================
    //  BIBLIOTECA
    // =========================================================================

    /// Cria ou atualiza a página pelo slug (a biblioteca é um wiki).
    pub async fn upsert_library_page(
        &self,
        title: &str,
        slug: &str,
        body: &str,
        updated_by: Uuid,
    ) -> Result<LibraryPage, AppError> {
        let page = sqlx::query_as::<_, LibraryPage>(
            r#"
            INSERT INTO library_pages (title, slug, body, updated_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug)
            DO UPDATE SET title = EXCLUDED.title, body = EXCLUDED.body,
                          updated_by = EXCLUDED.updated_by, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(slug)
        .bind(body)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(page)
    }

    pub async fn list_library_pages(&self) -> Result<Vec<LibraryPage>, AppError> {
        let pages = sqlx::query_as::<_, LibraryPage>(
            "SELECT * FROM library_pages WHERE active = TRUE ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pages)
    }

    pub async fn find_library_page(&self, slug: &str) -> Result<Option<LibraryPage>, AppError> {
        let page = sqlx::query_as::<_, LibraryPage>(
            "SELECT * FROM library_pages WHERE slug = $1 AND active = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(page)
    }
}
