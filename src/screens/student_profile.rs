use super::profile::{contact_fields, header, own_profile_links, ProfileCard};
use super::{LocalState, ScreenKind, ScreenSpec};
use crate::error::ClientError;
use crate::graphql::records::{full_name, Student};
use crate::graphql::{decode_first, operations, Operation};
use crate::view::{Action, Button, Node};

/// The signed-in student's own profile. A picked image stays local until
/// the student saves it with EditStudent.
pub struct StudentProfileScreen {
    dni: String,
}

impl StudentProfileScreen {
    pub fn new(dni: &str) -> Self {
        Self {
            dni: dni.to_string(),
        }
    }
}

impl ScreenSpec for StudentProfileScreen {
    type Data = Student;

    fn kind(&self) -> ScreenKind {
        ScreenKind::StudentProfile
    }

    fn read(&self) -> Operation {
        operations::get_student_by_dni(&self.dni)
    }

    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError> {
        decode_first(data, "students")
    }

    fn render(&self, student: &Self::Data, local: &LocalState) -> Vec<Node> {
        let card = ProfileCard {
            name: full_name(&student.name, student.lastname.as_deref()),
            role_label: "Estudiante",
            picture: local
                .selected_image
                .clone()
                .or_else(|| student.picture.clone()),
            pickable: true,
            email: student.email.as_deref(),
            dni: student.dni.as_deref(),
            address: student.address.as_deref(),
        };
        let mut nodes = header(&card);
        if local.selected_image.is_some() {
            nodes.push(Node::Link(Button::new("GUARDAR FOTO", Action::SavePicture)));
        }
        nodes.extend(own_profile_links());
        nodes.extend(contact_fields(&card));
        nodes
    }

    fn save_picture(&self, student: &Self::Data, picture: &str) -> Option<Operation> {
        Some(operations::edit_student_picture(&student.id, picture))
    }

    fn picks_images(&self) -> bool {
        true
    }
}
