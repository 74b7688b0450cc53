use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;

use crate::modules::courses::model::{Course, CourseWithTeacher};
use crate::modules::courses::service::CourseService;
use crate::modules::exams::model::{
    CreateExamDto, Exam, ExamCountResponse, ExamDetail, PaginatedExamsResponse, UpdateExamDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageQuery, Pagination};

pub struct ExamService;

impl ExamService {
    #[instrument(skip(db))]
    pub async fn create_exam(db: &PgPool, dto: CreateExamDto) -> Result<Exam, AppError> {
        CourseService::ensure_course_exists(db, dto.course_id).await?;

        let exam = sqlx::query_as::<_, Exam>(
            r#"INSERT INTO exams (course_id, exam_type, date, average_score, comments)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, course_id, exam_type, date, average_score, comments"#,
        )
        .bind(dto.course_id)
        .bind(&dto.exam_type)
        .bind(&dto.date)
        .bind(dto.average_score)
        .bind(&dto.comments)
        .fetch_one(db)
        .await?;

        Ok(exam)
    }

    #[instrument(skip(db, query))]
    pub async fn list_exams(
        db: &PgPool,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedExamsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams")
            .fetch_one(db)
            .await?;

        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT id, course_id, exam_type, date, average_score, comments
               FROM exams
               ORDER BY id ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_course(db, exams).await?;

        Ok(PaginatedExamsResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    /// Exams of one type, most recent exam date first.
    #[instrument(skip(db, query))]
    pub async fn exams_by_type(
        db: &PgPool,
        exam_type: &str,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedExamsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams WHERE exam_type = $1")
            .bind(exam_type)
            .fetch_one(db)
            .await?;

        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT id, course_id, exam_type, date, average_score, comments
               FROM exams
               WHERE exam_type = $1
               ORDER BY date DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(exam_type)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_course(db, exams).await?;

        Ok(PaginatedExamsResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db, query))]
    pub async fn exams_by_date(
        db: &PgPool,
        date: &str,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedExamsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams WHERE date = $1")
            .bind(date)
            .fetch_one(db)
            .await?;

        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT id, course_id, exam_type, date, average_score, comments
               FROM exams
               WHERE date = $1
               ORDER BY id ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(date)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_course(db, exams).await?;

        Ok(PaginatedExamsResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_exam_by_id(db: &PgPool, id: i64) -> Result<ExamDetail, AppError> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"SELECT id, course_id, exam_type, date, average_score, comments
               FROM exams
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam with id {id} not found")))?;

        let mut exams = Self::with_course(db, vec![exam]).await?;
        Ok(exams.remove(0))
    }

    #[instrument(skip(db))]
    pub async fn update_exam(
        db: &PgPool,
        id: i64,
        dto: UpdateExamDto,
    ) -> Result<ExamDetail, AppError> {
        let existing = sqlx::query_as::<_, Exam>(
            r#"SELECT id, course_id, exam_type, date, average_score, comments
               FROM exams
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam with id {id} not found")))?;

        if let Some(course_id) = dto.course_id {
            CourseService::ensure_course_exists(db, course_id).await?;
        }

        let course_id = dto.course_id.unwrap_or(existing.course_id);
        let exam_type = dto.exam_type.unwrap_or(existing.exam_type);
        let date = dto.date.unwrap_or(existing.date);
        let average_score = dto.average_score.unwrap_or(existing.average_score);
        let comments = if dto.comments.is_some() {
            dto.comments
        } else {
            existing.comments
        };

        sqlx::query(
            r#"UPDATE exams
               SET course_id = $1, exam_type = $2, date = $3, average_score = $4, comments = $5
               WHERE id = $6"#,
        )
        .bind(course_id)
        .bind(&exam_type)
        .bind(&date)
        .bind(average_score)
        .bind(&comments)
        .bind(id)
        .execute(db)
        .await?;

        Self::get_exam_by_id(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_exam(db: &PgPool, id: i64) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM exams WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Exam with id {id} not found"
            )));
        }

        sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn count_by_course(
        db: &PgPool,
        course_id: i64,
    ) -> Result<ExamCountResponse, AppError> {
        CourseService::ensure_course_exists(db, course_id).await?;

        let exam_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(db)
                .await?;

        Ok(ExamCountResponse {
            course_id,
            exam_count,
        })
    }

    /// Embeds each exam's course, with the course's teacher, preserving the
    /// incoming exam order.
    async fn with_course(db: &PgPool, exams: Vec<Exam>) -> Result<Vec<ExamDetail>, AppError> {
        if exams.is_empty() {
            return Ok(Vec::new());
        }

        let mut course_ids: Vec<i64> = exams.iter().map(|exam| exam.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               WHERE id = ANY($1)"#,
        )
        .bind(&course_ids)
        .fetch_all(db)
        .await?;

        let courses_by_id: HashMap<i64, CourseWithTeacher> =
            CourseService::with_teacher(db, courses)
                .await?
                .into_iter()
                .map(|course| (course.id, course))
                .collect();

        exams
            .into_iter()
            .map(|exam| {
                let course = courses_by_id.get(&exam.course_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow::anyhow!(
                        "Exam {} references missing course {}",
                        exam.id,
                        exam.course_id
                    ))
                })?;
                Ok(ExamDetail::from_parts(exam, course))
            })
            .collect()
    }
}
