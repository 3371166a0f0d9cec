use super::profile::{contact_fields, header, ProfileCard};
use super::{LocalState, ScreenKind, ScreenSpec};
use crate::error::ClientError;
use crate::graphql::records::{full_name, Student};
use crate::graphql::{decode_first, operations, Operation};
use crate::view::Node;

pub struct AdminStudentDetailScreen {
    id: String,
}

impl AdminStudentDetailScreen {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl ScreenSpec for AdminStudentDetailScreen {
    type Data = Student;

    fn kind(&self) -> ScreenKind {
        ScreenKind::AdminStudentDetail
    }

    fn read(&self) -> Operation {
        operations::get_student_by_id(&self.id)
    }

    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError> {
        decode_first(data, "students")
    }

    fn render(&self, student: &Self::Data, _local: &LocalState) -> Vec<Node> {
        let card = ProfileCard {
            name: full_name(&student.name, student.lastname.as_deref()),
            role_label: "Estudiante",
            picture: student.picture.clone(),
            pickable: false,
            email: student.email.as_deref(),
            dni: student.dni.as_deref(),
            address: student.address.as_deref(),
        };
        let mut nodes = header(&card);
        nodes.extend(contact_fields(&card));
        nodes
    }
}
