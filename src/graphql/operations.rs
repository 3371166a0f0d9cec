//! Named operations. The documents are the wire contract with the service;
//! their selections must not drift.

use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(rename = "operationName")]
    pub name: &'static str,
    #[serde(skip)]
    pub kind: OperationKind,
    #[serde(rename = "query")]
    pub document: &'static str,
    pub variables: serde_json::Value,
}

impl Operation {
    fn read(name: &'static str, document: &'static str, variables: serde_json::Value) -> Self {
        Self {
            name,
            kind: OperationKind::Read,
            document,
            variables,
        }
    }

    fn write(name: &'static str, document: &'static str, variables: serde_json::Value) -> Self {
        Self {
            name,
            kind: OperationKind::Write,
            document,
            variables,
        }
    }
}

pub const GET_STUDENT_BY_DNI: &str = "query GetStudentById($dni: String) {
  students(dni: $dni) {
    _id
    name
    lastname
    dni
    email
    whatsapp
    address
    birthday
    picture
  }
}";

pub const GET_STUDENT_BY_ID: &str = "query GetStudentById($_id: ID) {
  students(_id: $_id) {
    _id
    name
    lastname
    dni
    email
    whatsapp
    address
    birthday
    picture
  }
}";

pub const GET_TEACHER_BY_DNI: &str = "query GetTeacherById($dni: String) {
  teachers(dni: $dni) {
    _id
    name
    lastname
    dni
    email
    whatsapp
    address
    birthday
    picture
    subjects {
      _id
      name
      course {
        _id
        name
      }
    }
  }
}";

pub const GET_ALL_GRADES: &str = "query GetAllGrades {
  grades {
    _id
    name
  }
}";

pub const DELETE_GRADE: &str = "mutation DeleteGrade($_id: ID) {
  deleteGrade(_id: $_id) {
    name
  }
}";

pub const GET_ALL_TEACHERS: &str = "query GetAllTeachers {
  teachers {
    _id
    name
    lastname
    subjects {
      name
      course {
        name
        _id
      }
    }
  }
}";

pub const DELETE_TEACHER: &str = "mutation DeleteTeacher($_id: ID) {
  deleteTeacher(_id: $_id) {
    name
  }
}";

pub const GET_COURSES_FROM_A_TEACHER: &str = "query GetCoursesFromATeacher($dni: String) {
  teachers(dni: $dni) {
    _id
    name
    courses {
      _id
      name
    }
    subjects {
      _id
      name
      course {
        _id
        name
      }
    }
  }
}";

pub const EDIT_STUDENT: &str = "mutation EditStudent($_id: ID, $picture: String) {
  editStudent(_id: $_id, input: { picture: $picture }) {
    name
  }
}";

pub fn get_student_by_dni(dni: &str) -> Operation {
    Operation::read("GetStudentById", GET_STUDENT_BY_DNI, json!({ "dni": dni }))
}

pub fn get_student_by_id(id: &str) -> Operation {
    Operation::read("GetStudentById", GET_STUDENT_BY_ID, json!({ "_id": id }))
}

pub fn get_teacher_by_dni(dni: &str) -> Operation {
    Operation::read("GetTeacherById", GET_TEACHER_BY_DNI, json!({ "dni": dni }))
}

pub fn get_all_grades() -> Operation {
    Operation::read("GetAllGrades", GET_ALL_GRADES, json!({}))
}

pub fn delete_grade(id: &str) -> Operation {
    Operation::write("DeleteGrade", DELETE_GRADE, json!({ "_id": id }))
}

pub fn get_all_teachers() -> Operation {
    Operation::read("GetAllTeachers", GET_ALL_TEACHERS, json!({}))
}

pub fn delete_teacher(id: &str) -> Operation {
    Operation::write("DeleteTeacher", DELETE_TEACHER, json!({ "_id": id }))
}

pub fn get_courses_from_a_teacher(dni: &str) -> Operation {
    Operation::read(
        "GetCoursesFromATeacher",
        GET_COURSES_FROM_A_TEACHER,
        json!({ "dni": dni }),
    )
}

pub fn edit_student_picture(id: &str, picture: &str) -> Operation {
    Operation::write(
        "EditStudent",
        EDIT_STUDENT,
        json!({ "_id": id, "picture": picture }),
    )
}
