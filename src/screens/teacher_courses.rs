use super::{LocalState, ScreenKind, ScreenSpec};
use crate::error::ClientError;
use crate::graphql::records::{CourseRef, Teacher};
use crate::graphql::{decode_first, operations, Operation};
use crate::view::{Action, Button, Node};
use serde_json::json;

pub const NO_COURSES_NOTICE: &str = "No tienes Cursos asignados";

/// The service has no "course of this teacher" relation; the course of the
/// first subject stands in for it. `None` when that position is empty.
pub fn assigned_course(teacher: &Teacher) -> Option<&CourseRef> {
    teacher.subjects.first()?.course.as_ref()
}

pub struct TeacherCoursesScreen {
    dni: String,
}

impl TeacherCoursesScreen {
    pub fn new(dni: &str) -> Self {
        Self {
            dni: dni.to_string(),
        }
    }
}

impl ScreenSpec for TeacherCoursesScreen {
    type Data = Option<CourseRef>;

    fn kind(&self) -> ScreenKind {
        ScreenKind::TeacherCourses
    }

    fn read(&self) -> Operation {
        operations::get_courses_from_a_teacher(&self.dni)
    }

    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError> {
        let teacher: Teacher = decode_first(data, "teachers")?;
        let course = assigned_course(&teacher).cloned();
        if course.is_none() {
            tracing::info!(
                teacher = %teacher.id,
                subjects = teacher.subjects.len(),
                "teacher has no course through the first subject"
            );
        }
        Ok(course)
    }

    fn render(&self, course: &Self::Data, _local: &LocalState) -> Vec<Node> {
        let Some(course) = course else {
            return vec![Node::Notice {
                text: NO_COURSES_NOTICE.to_string(),
            }];
        };
        let id = course.id.clone().unwrap_or_default();
        vec![Node::Card {
            key: id.clone(),
            title: course.name.clone().unwrap_or_default(),
            on_press: None,
            actions: vec![Button::new(
                "Alumnos",
                Action::navigate("TeacherListStudents", json!({ "params": { "_id": id } })),
            )],
        }]
    }
}
