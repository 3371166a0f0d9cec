use super::{DeleteIntent, LocalState, ScreenKind, ScreenSpec};
use crate::error::{ClientError, HostError};
use crate::graphql::records::Grade;
use crate::graphql::{decode_field, operations, Operation};
use crate::view::{link, Action, Button, Node};
use serde_json::json;

/// Admin list of grades; each grade opens its course list.
pub struct GradesScreen;

impl ScreenSpec for GradesScreen {
    type Data = Vec<Grade>;

    fn kind(&self) -> ScreenKind {
        ScreenKind::Grades
    }

    fn read(&self) -> Operation {
        operations::get_all_grades()
    }

    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError> {
        decode_field(data, "grades")
    }

    fn render(&self, grades: &Self::Data, _local: &LocalState) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(grades.len() + 1);
        nodes.push(link("Agregar Grado", "SuperAdminAddGrade"));
        for grade in grades {
            nodes.push(Node::Card {
                key: grade.id.clone(),
                title: grade.name.clone(),
                on_press: Some(Action::navigate(
                    "SuperAdminListCourses",
                    json!({
                        "screen": "SuperAdminListCourses",
                        "params": { "id": grade.id },
                    }),
                )),
                actions: vec![Button::new(
                    "X",
                    Action::RequestDelete {
                        record_id: grade.id.clone(),
                    },
                )],
            });
        }
        nodes
    }

    fn delete(&self, grades: &Self::Data, record_id: &str) -> Result<DeleteIntent, HostError> {
        let Some(grade) = grades.iter().find(|g| g.id == record_id) else {
            return Err(HostError::UnknownRecord(record_id.to_string()));
        };
        Ok(DeleteIntent {
            title: "Eliminar grado".to_string(),
            message: format!(
                "¿Está seguro que desea eliminar este grado {}?",
                grade.name
            ),
            operation: operations::delete_grade(&grade.id),
        })
    }
}
