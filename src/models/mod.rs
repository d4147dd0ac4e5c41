pub mod course;
pub mod student;

pub use course::{AddCoursesRequest, Course, CourseUpdate, NewCourseRequest};
pub use student::{
    EditStudentRequest, RegisterRequest, SigninRequest, Student, StudentPage, StudentWithCourses,
};
