// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{ClassGroup, ClassGroupDetail, Course},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CURSOS
    // =========================================================================

    pub async fn create_course(
        &self,
        name: &str,
        category: &str,
        modality: &str,
        price: Decimal,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (name, category, modality, price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(modality)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(courses)
    }

    pub async fn find_course(&self, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    pub async fn toggle_course(&self, id: Uuid) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "UPDATE courses SET active = NOT active, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Curso"))?;

        Ok(course)
    }

    // =========================================================================
    //  TURMAS
    // =========================================================================

    pub async fn create_class_group(
        &self,
        title: &str,
        course_id: Uuid,
        teacher_id: Uuid,
        modality: &str,
        schedule: &str,
    ) -> Result<ClassGroup, AppError> {
        let class_group = sqlx::query_as::<_, ClassGroup>(
            r#"
            INSERT INTO class_groups (title, course_id, teacher_id, modality, schedule)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(course_id)
        .bind(teacher_id)
        .bind(modality)
        .bind(schedule)
        .fetch_one(&self.pool)
        .await?;

        Ok(class_group)
    }

    pub async fn find_class_group(&self, id: Uuid) -> Result<Option<ClassGroup>, AppError> {
        let class_group = sqlx::query_as::<_, ClassGroup>("SELECT * FROM class_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(class_group)
    }

    pub async fn list_class_groups(&self) -> Result<Vec<ClassGroupDetail>, AppError> {
        let rows = sqlx::query_as::<_, ClassGroupDetail>(
            r#"
            SELECT cg.id, cg.title, cg.course_id, c.name AS course_name,
                   cg.teacher_id, u.name AS teacher_name,
                   cg.modality, cg.schedule, cg.active, cg.created_at
            FROM class_groups cg
            JOIN courses c ON c.id = cg.course_id
            JOIN users u ON u.id = cg.teacher_id
            ORDER BY cg.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Turmas ativas de um professor (painel do professor).
    pub async fn list_class_groups_by_teacher(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<ClassGroupDetail>, AppError> {
        let rows = sqlx::query_as::<_, ClassGroupDetail>(
            r#"
            SELECT cg.id, cg.title, cg.course_id, c.name AS course_name,
                   cg.teacher_id, u.name AS teacher_name,
                   cg.modality, cg.schedule, cg.active, cg.created_at
            FROM class_groups cg
            JOIN courses c ON c.id = cg.course_id
            JOIN users u ON u.id = cg.teacher_id
            WHERE cg.teacher_id = $1 AND cg.active = TRUE
            ORDER BY cg.title ASC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn toggle_class_group(&self, id: Uuid) -> Result<ClassGroup, AppError> {
        let class_group = sqlx::query_as::<_, ClassGroup>(
            "UPDATE class_groups SET active = NOT active, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Turma"))?;

        Ok(class_group)
    }
}
