use utoipa::OpenApi;

use crate::modules::courses::model::{
    Course, CourseDetail, CourseWithTeacher, CreateCourseDto, PaginatedCoursesResponse,
    UpdateCourseDto,
};
use crate::modules::exams::model::{
    CreateExamDto, Exam, ExamCountResponse, ExamDetail, PaginatedExamsResponse, UpdateExamDto,
};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherWithCourses, UpdateTeacherDto,
};
use crate::utils::pagination::{PageQuery, Pagination};
use crate::utils::response::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teachers_by_area,
        crate::modules::teachers::controller::get_teachers_by_level,
        crate::modules::teachers::controller::get_teacher_by_id,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_courses_with_exams,
        crate::modules::courses::controller::get_courses_by_teacher,
        crate::modules::courses::controller::get_courses_by_group,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::get_exams,
        crate::modules::exams::controller::get_exams_by_type,
        crate::modules::exams::controller::get_exams_by_date,
        crate::modules::exams::controller::count_exams_by_course,
        crate::modules::exams::controller::get_exam_by_id,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
    ),
    components(
        schemas(
            Teacher,
            TeacherWithCourses,
            CreateTeacherDto,
            UpdateTeacherDto,
            PaginatedTeachersResponse,
            Course,
            CourseDetail,
            CourseWithTeacher,
            CreateCourseDto,
            UpdateCourseDto,
            PaginatedCoursesResponse,
            Exam,
            ExamDetail,
            CreateExamDto,
            UpdateExamDto,
            ExamCountResponse,
            PaginatedExamsResponse,
            PageQuery,
            Pagination,
            MessageResponse,
        )
    ),
    tags(
        (name = "Teachers", description = "Teacher records and filtered listings"),
        (name = "Courses", description = "Course records, owned by teachers"),
        (name = "Exams", description = "Exam records, owned by courses")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Academic records REST API: teachers, courses, and exams with paginated relational listings.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
