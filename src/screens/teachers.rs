use super::{DeleteIntent, LocalState, ScreenKind, ScreenSpec};
use crate::error::{ClientError, HostError};
use crate::graphql::records::{full_name, Teacher};
use crate::graphql::{decode_field, operations, Operation};
use crate::view::{link, Action, Button, Node};
use serde_json::json;

pub struct AdminTeachersScreen;

impl ScreenSpec for AdminTeachersScreen {
    type Data = Vec<Teacher>;

    fn kind(&self) -> ScreenKind {
        ScreenKind::AdminTeachers
    }

    fn read(&self) -> Operation {
        operations::get_all_teachers()
    }

    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError> {
        decode_field(data, "teachers")
    }

    fn render(&self, teachers: &Self::Data, _local: &LocalState) -> Vec<Node> {
        let mut nodes = vec![
            link("AGREGAR PROFESOR", "AddTeacher"),
            link("AGREGAR PROFESORES CON CSV", "CreateTeachersCsv"),
        ];
        nodes.extend(teachers.iter().map(|t| Node::Card {
            key: t.id.clone(),
            title: full_name(&t.name, t.lastname.as_deref()),
            on_press: None,
            actions: vec![
                Button::new(
                    "info",
                    Action::navigate("TeacherDetail", json!({ "_id": t.id })),
                ),
                Button::new(
                    "edit",
                    Action::navigate("EditTeacher", json!({ "teacherId": t.id })),
                ),
                Button::new(
                    "X",
                    Action::RequestDelete {
                        record_id: t.id.clone(),
                    },
                ),
            ],
        }));
        nodes
    }

    fn delete(&self, teachers: &Self::Data, record_id: &str) -> Result<DeleteIntent, HostError> {
        let Some(teacher) = teachers.iter().find(|t| t.id == record_id) else {
            return Err(HostError::UnknownRecord(record_id.to_string()));
        };
        Ok(DeleteIntent {
            title: "Eliminar usuario".to_string(),
            message: format!(
                "¿Está seguro que desea eliminar al profesor {}?",
                teacher.name
            ),
            operation: operations::delete_teacher(&teacher.id),
        })
    }
}
