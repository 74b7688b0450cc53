use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;

use crate::modules::courses::model::Course;
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherWithCourses, UpdateTeacherDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageQuery, Pagination};

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"INSERT INTO teachers (first_name, last_name, email, subject_area, academic_level, admission_date)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, first_name, last_name, email, subject_area, academic_level, admission_date"#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.subject_area)
        .bind(&dto.academic_level)
        .bind(&dto.admission_date)
        .fetch_one(db)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(db, query))]
    pub async fn list_teachers(
        db: &PgPool,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(db)
            .await?;

        let teachers = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, first_name, last_name, email, subject_area, academic_level, admission_date
               FROM teachers
               ORDER BY id ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_courses(db, teachers).await?;

        Ok(PaginatedTeachersResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db, query))]
    pub async fn teachers_by_area(
        db: &PgPool,
        area: &str,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers WHERE subject_area = $1")
                .bind(area)
                .fetch_one(db)
                .await?;

        let teachers = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, first_name, last_name, email, subject_area, academic_level, admission_date
               FROM teachers
               WHERE subject_area = $1
               ORDER BY last_name ASC, first_name ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(area)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_courses(db, teachers).await?;

        Ok(PaginatedTeachersResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db, query))]
    pub async fn teachers_by_level(
        db: &PgPool,
        level: &str,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers WHERE academic_level = $1")
                .bind(level)
                .fetch_one(db)
                .await?;

        let teachers = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, first_name, last_name, email, subject_area, academic_level, admission_date
               FROM teachers
               WHERE academic_level = $1
               ORDER BY last_name ASC, first_name ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(level)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_courses(db, teachers).await?;

        Ok(PaginatedTeachersResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(db: &PgPool, id: i64) -> Result<TeacherWithCourses, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, first_name, last_name, email, subject_area, academic_level, admission_date
               FROM teachers
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher with id {id} not found")))?;

        let mut teachers = Self::with_courses(db, vec![teacher]).await?;
        Ok(teachers.remove(0))
    }

    #[instrument(skip(db))]
    pub async fn update_teacher(
        db: &PgPool,
        id: i64,
        dto: UpdateTeacherDto,
    ) -> Result<TeacherWithCourses, AppError> {
        let existing = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, first_name, last_name, email, subject_area, academic_level, admission_date
               FROM teachers
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher with id {id} not found")))?;

        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let email = dto.email.unwrap_or(existing.email);
        let subject_area = dto.subject_area.unwrap_or(existing.subject_area);
        let academic_level = dto.academic_level.unwrap_or(existing.academic_level);
        let admission_date = dto.admission_date.unwrap_or(existing.admission_date);

        sqlx::query(
            r#"UPDATE teachers
               SET first_name = $1, last_name = $2, email = $3, subject_area = $4,
                   academic_level = $5, admission_date = $6
               WHERE id = $7"#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&subject_area)
        .bind(&academic_level)
        .bind(&admission_date)
        .bind(id)
        .execute(db)
        .await?;

        Self::get_teacher_by_id(db, id).await
    }

    /// Deletes a teacher. Teachers that still own courses are not deletable;
    /// the caller gets a 409 naming the dependent count.
    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: i64) -> Result<(), AppError> {
        Self::ensure_teacher_exists(db, id).await?;

        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE teacher_id = $1")
                .bind(id)
                .fetch_one(db)
                .await?;

        if dependents > 0 {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Teacher {id} still has {dependents} course(s) and cannot be deleted"
            )));
        }

        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Existence check used before accepting `teacher_id` as a foreign key.
    pub async fn ensure_teacher_exists(db: &PgPool, id: i64) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found(anyhow::anyhow!(
                "Teacher with id {id} not found"
            )))
        }
    }

    /// Embeds each teacher's courses with one batched query.
    async fn with_courses(
        db: &PgPool,
        teachers: Vec<Teacher>,
    ) -> Result<Vec<TeacherWithCourses>, AppError> {
        if teachers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = teachers.iter().map(|teacher| teacher.id).collect();

        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               WHERE teacher_id = ANY($1)
               ORDER BY id ASC"#,
        )
        .bind(&ids)
        .fetch_all(db)
        .await?;

        let mut courses_by_teacher: HashMap<i64, Vec<Course>> = HashMap::new();
        for course in courses {
            courses_by_teacher
                .entry(course.teacher_id)
                .or_default()
                .push(course);
        }

        Ok(teachers
            .into_iter()
            .map(|teacher| {
                let courses = courses_by_teacher.remove(&teacher.id).unwrap_or_default();
                TeacherWithCourses::from_parts(teacher, courses)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn teacher_dto(first_name: &str, last_name: &str, area: &str, level: &str) -> CreateTeacherDto {
        CreateTeacherDto {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!(
                "{}.{}@faculty.test",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            ),
            subject_area: area.to_string(),
            academic_level: level.to_string(),
            admission_date: "2019-08-12".to_string(),
        }
    }

    async fn seed_course(pool: &PgPool, teacher_id: i64, name: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO courses (teacher_id, name, code, group_name, schedule, room)
               VALUES ($1, $2, 'C-101', 'A', 'Mon 10:00', '201')
               RETURNING id"#,
        )
        .bind(teacher_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_teacher_success(pool: PgPool) {
        let dto = teacher_dto("Laura", "Mendez", "Mathematics", "Doctorate");

        let teacher = TeacherService::create_teacher(&pool, dto).await.unwrap();

        assert!(teacher.id > 0);
        assert_eq!(teacher.first_name, "Laura");
        assert_eq!(teacher.subject_area, "Mathematics");
        assert_eq!(teacher.admission_date, "2019-08-12");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_teacher_by_id_embeds_courses(pool: PgPool) {
        let teacher = TeacherService::create_teacher(
            &pool,
            teacher_dto("Ana", "Reyes", "Physics", "Master's"),
        )
        .await
        .unwrap();

        seed_course(&pool, teacher.id, "Mechanics").await;
        seed_course(&pool, teacher.id, "Optics").await;

        let found = TeacherService::get_teacher_by_id(&pool, teacher.id)
            .await
            .unwrap();

        assert_eq!(found.id, teacher.id);
        assert_eq!(found.courses.len(), 2);
        assert_eq!(found.courses[0].name, "Mechanics");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_teacher_by_id_not_found(pool: PgPool) {
        let result = TeacherService::get_teacher_by_id(&pool, 9999).await;

        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.error.to_string().contains("9999"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_teachers_pagination(pool: PgPool) {
        for i in 1..=25 {
            TeacherService::create_teacher(
                &pool,
                teacher_dto(&format!("First{i:02}"), &format!("Last{i:02}"), "History", "Bachelor's"),
            )
            .await
            .unwrap();
        }

        let query = PageQuery {
            page: Some(1),
            limit: Some(10),
        };
        let response = TeacherService::list_teachers(&pool, &query, "http://x/teachers")
            .await
            .unwrap();

        assert_eq!(response.data.len(), 10);
        assert_eq!(response.pagination.total, 25);
        assert_eq!(response.pagination.total_pages, 3);
        assert_eq!(
            response.pagination.next.as_deref(),
            Some("http://x/teachers?page=2&limit=10")
        );
        assert_eq!(response.pagination.prev, None);

        let query = PageQuery {
            page: Some(3),
            limit: Some(10),
        };
        let response = TeacherService::list_teachers(&pool, &query, "http://x/teachers")
            .await
            .unwrap();

        assert_eq!(response.data.len(), 5);
        assert_eq!(response.pagination.next, None);
        assert_eq!(
            response.pagination.prev.as_deref(),
            Some("http://x/teachers?page=2&limit=10")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_teachers_page_beyond_last(pool: PgPool) {
        for i in 1..=5 {
            TeacherService::create_teacher(
                &pool,
                teacher_dto(&format!("F{i}"), &format!("L{i}"), "Art", "Bachelor's"),
            )
            .await
            .unwrap();
        }

        let query = PageQuery {
            page: Some(4),
            limit: Some(2),
        };
        let response = TeacherService::list_teachers(&pool, &query, "http://x/teachers")
            .await
            .unwrap();

        assert!(response.data.is_empty());
        assert_eq!(response.pagination.next, None);
        assert_eq!(
            response.pagination.prev.as_deref(),
            Some("http://x/teachers?page=3&limit=2")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_teachers_by_area_filters_and_orders(pool: PgPool) {
        TeacherService::create_teacher(&pool, teacher_dto("Zoe", "Alvarez", "Math", "Doctorate"))
            .await
            .unwrap();
        TeacherService::create_teacher(&pool, teacher_dto("Ben", "Zamora", "Math", "Master's"))
            .await
            .unwrap();
        TeacherService::create_teacher(&pool, teacher_dto("Eva", "Luna", "Biology", "Master's"))
            .await
            .unwrap();

        let query = PageQuery {
            page: Some(1),
            limit: Some(10),
        };
        let response =
            TeacherService::teachers_by_area(&pool, "Math", &query, "http://x/teachers/area/Math")
                .await
                .unwrap();

        assert_eq!(response.pagination.total, 2);
        assert_eq!(response.data.len(), 2);
        // ordered by last name: Alvarez before Zamora
        assert_eq!(response.data[0].last_name, "Alvarez");
        assert_eq!(response.data[1].last_name, "Zamora");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_teacher_partial(pool: PgPool) {
        let teacher = TeacherService::create_teacher(
            &pool,
            teacher_dto("Mario", "Santos", "Chemistry", "Master's"),
        )
        .await
        .unwrap();

        let dto = UpdateTeacherDto {
            first_name: None,
            last_name: None,
            email: Some("m.santos@faculty.test".to_string()),
            subject_area: None,
            academic_level: None,
            admission_date: None,
        };

        let updated = TeacherService::update_teacher(&pool, teacher.id, dto)
            .await
            .unwrap();

        assert_eq!(updated.email, "m.santos@faculty.test");
        assert_eq!(updated.first_name, "Mario");
        assert_eq!(updated.subject_area, "Chemistry");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_teacher_not_found(pool: PgPool) {
        let dto = UpdateTeacherDto {
            first_name: Some("Ghost".to_string()),
            last_name: None,
            email: None,
            subject_area: None,
            academic_level: None,
            admission_date: None,
        };

        let err = TeacherService::update_teacher(&pool, 4242, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_teacher_with_courses_rejected(pool: PgPool) {
        let teacher = TeacherService::create_teacher(
            &pool,
            teacher_dto("Irene", "Vidal", "Literature", "Doctorate"),
        )
        .await
        .unwrap();
        seed_course(&pool, teacher.id, "Poetry").await;

        let err = TeacherService::delete_teacher(&pool, teacher.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        // the row must survive the rejected delete
        TeacherService::get_teacher_by_id(&pool, teacher.id)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_teacher_twice(pool: PgPool) {
        let teacher = TeacherService::create_teacher(
            &pool,
            teacher_dto("Noel", "Prado", "Music", "Bachelor's"),
        )
        .await
        .unwrap();

        TeacherService::delete_teacher(&pool, teacher.id)
            .await
            .unwrap();

        let err = TeacherService::delete_teacher(&pool, teacher.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
