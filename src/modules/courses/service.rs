use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;

use crate::modules::courses::model::{
    Course, CourseDetail, CourseWithTeacher, CreateCourseDto, PaginatedCoursesResponse,
    UpdateCourseDto,
};
use crate::modules::exams::model::Exam;
use crate::modules::teachers::model::Teacher;
use crate::modules::teachers::service::TeacherService;
use crate::utils::errors::AppError;
use crate::utils::pagination::{PageQuery, Pagination};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        TeacherService::ensure_teacher_exists(db, dto.teacher_id).await?;

        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (teacher_id, name, code, group_name, schedule, room)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, teacher_id, name, code, group_name, schedule, room"#,
        )
        .bind(dto.teacher_id)
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(&dto.group_name)
        .bind(&dto.schedule)
        .bind(&dto.room)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(db, query))]
    pub async fn list_courses(
        db: &PgPool,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(db)
            .await?;

        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               ORDER BY id ASC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_relations(db, courses).await?;

        Ok(PaginatedCoursesResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    /// Same page semantics and ordering as the unfiltered listing; kept as
    /// its own endpoint for compatibility with existing clients.
    #[instrument(skip(db, query))]
    pub async fn courses_with_exams(
        db: &PgPool,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        Self::list_courses(db, query, base_url).await
    }

    #[instrument(skip(db, query))]
    pub async fn courses_by_teacher(
        db: &PgPool,
        teacher_id: i64,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        TeacherService::ensure_teacher_exists(db, teacher_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_one(db)
                .await?;

        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               WHERE teacher_id = $1
               ORDER BY name ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(teacher_id)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_relations(db, courses).await?;

        Ok(PaginatedCoursesResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db, query))]
    pub async fn courses_by_group(
        db: &PgPool,
        group_name: &str,
        query: &PageQuery,
        base_url: &str,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE group_name = $1")
                .bind(group_name)
                .fetch_one(db)
                .await?;

        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               WHERE group_name = $1
               ORDER BY name ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(group_name)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(db)
        .await?;

        let data = Self::with_relations(db, courses).await?;

        Ok(PaginatedCoursesResponse {
            pagination: Pagination::new(total, query.page(), query.limit(), base_url),
            data,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_course_by_id(db: &PgPool, id: i64) -> Result<CourseDetail, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course with id {id} not found")))?;

        let mut courses = Self::with_relations(db, vec![course]).await?;
        Ok(courses.remove(0))
    }

    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        id: i64,
        dto: UpdateCourseDto,
    ) -> Result<CourseDetail, AppError> {
        let existing = sqlx::query_as::<_, Course>(
            r#"SELECT id, teacher_id, name, code, group_name, schedule, room
               FROM courses
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course with id {id} not found")))?;

        if let Some(teacher_id) = dto.teacher_id {
            TeacherService::ensure_teacher_exists(db, teacher_id).await?;
        }

        let teacher_id = dto.teacher_id.unwrap_or(existing.teacher_id);
        let name = dto.name.unwrap_or(existing.name);
        let code = dto.code.unwrap_or(existing.code);
        let group_name = dto.group_name.unwrap_or(existing.group_name);
        let schedule = dto.schedule.unwrap_or(existing.schedule);
        let room = dto.room.unwrap_or(existing.room);

        sqlx::query(
            r#"UPDATE courses
               SET teacher_id = $1, name = $2, code = $3, group_name = $4,
                   schedule = $5, room = $6
               WHERE id = $7"#,
        )
        .bind(teacher_id)
        .bind(&name)
        .bind(&code)
        .bind(&group_name)
        .bind(&schedule)
        .bind(&room)
        .bind(id)
        .execute(db)
        .await?;

        Self::get_course_by_id(db, id).await
    }

    /// Deletes a course. Courses that still have exams are not deletable.
    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: i64) -> Result<(), AppError> {
        Self::ensure_course_exists(db, id).await?;

        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams WHERE course_id = $1")
                .bind(id)
                .fetch_one(db)
                .await?;

        if dependents > 0 {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Course {id} still has {dependents} exam(s) and cannot be deleted"
            )));
        }

        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Existence check used before accepting `course_id` as a foreign key.
    pub async fn ensure_course_exists(db: &PgPool, id: i64) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found(anyhow::anyhow!(
                "Course with id {id} not found"
            )))
        }
    }

    /// Embeds each course's teacher and exams with two batched queries.
    async fn with_relations(
        db: &PgPool,
        courses: Vec<Course>,
    ) -> Result<Vec<CourseDetail>, AppError> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = courses.iter().map(|course| course.id).collect();
        let teachers_by_id = Self::teachers_by_id(db, &courses).await?;

        let exams = sqlx::query_as::<_, Exam>(
            r#"SELECT id, course_id, exam_type, date, average_score, comments
               FROM exams
               WHERE course_id = ANY($1)
               ORDER BY id ASC"#,
        )
        .bind(&ids)
        .fetch_all(db)
        .await?;

        let mut exams_by_course: HashMap<i64, Vec<Exam>> = HashMap::new();
        for exam in exams {
            exams_by_course.entry(exam.course_id).or_default().push(exam);
        }

        courses
            .into_iter()
            .map(|course| {
                let teacher = Self::owning_teacher(&teachers_by_id, &course)?;
                let exams = exams_by_course.remove(&course.id).unwrap_or_default();
                Ok(CourseDetail::from_parts(course, teacher, exams))
            })
            .collect()
    }

    /// Embeds only the owning teacher; used for courses nested inside exam
    /// responses.
    pub(crate) async fn with_teacher(
        db: &PgPool,
        courses: Vec<Course>,
    ) -> Result<Vec<CourseWithTeacher>, AppError> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let teachers_by_id = Self::teachers_by_id(db, &courses).await?;

        courses
            .into_iter()
            .map(|course| {
                let teacher = Self::owning_teacher(&teachers_by_id, &course)?;
                Ok(CourseWithTeacher::from_parts(course, teacher))
            })
            .collect()
    }

    async fn teachers_by_id(
        db: &PgPool,
        courses: &[Course],
    ) -> Result<HashMap<i64, Teacher>, AppError> {
        let mut teacher_ids: Vec<i64> = courses.iter().map(|course| course.teacher_id).collect();
        teacher_ids.sort_unstable();
        teacher_ids.dedup();

        let teachers = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, first_name, last_name, email, subject_area, academic_level, admission_date
               FROM teachers
               WHERE id = ANY($1)"#,
        )
        .bind(&teacher_ids)
        .fetch_all(db)
        .await?;

        Ok(teachers
            .into_iter()
            .map(|teacher| (teacher.id, teacher))
            .collect())
    }

    fn owning_teacher(
        teachers_by_id: &HashMap<i64, Teacher>,
        course: &Course,
    ) -> Result<Teacher, AppError> {
        teachers_by_id
            .get(&course.teacher_id)
            .cloned()
            .ok_or_else(|| {
                AppError::internal(anyhow::anyhow!(
                    "Course {} references missing teacher {}",
                    course.id,
                    course.teacher_id
                ))
            })
    }
}
