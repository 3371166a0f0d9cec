use super::profile::{contact_fields, header, own_profile_links, ProfileCard};
use super::{LocalState, ScreenKind, ScreenSpec};
use crate::error::ClientError;
use crate::graphql::records::{full_name, Teacher};
use crate::graphql::{decode_first, operations, Operation};
use crate::view::Node;

/// The signed-in teacher's own profile.
pub struct TeacherProfileScreen {
    dni: String,
}

impl TeacherProfileScreen {
    pub fn new(dni: &str) -> Self {
        Self {
            dni: dni.to_string(),
        }
    }
}

impl ScreenSpec for TeacherProfileScreen {
    type Data = Teacher;

    fn kind(&self) -> ScreenKind {
        ScreenKind::TeacherProfile
    }

    fn read(&self) -> Operation {
        operations::get_teacher_by_dni(&self.dni)
    }

    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError> {
        decode_first(data, "teachers")
    }

    fn render(&self, teacher: &Self::Data, local: &LocalState) -> Vec<Node> {
        let card = ProfileCard {
            name: full_name(&teacher.name, teacher.lastname.as_deref()),
            role_label: "Profesor",
            picture: local
                .selected_image
                .clone()
                .or_else(|| teacher.picture.clone()),
            pickable: true,
            email: teacher.email.as_deref(),
            dni: teacher.dni.as_deref(),
            address: teacher.address.as_deref(),
        };
        let mut nodes = header(&card);
        nodes.extend(own_profile_links());
        nodes.extend(contact_fields(&card));
        nodes.push(Node::Section {
            title: "Materias".to_string(),
            items: teacher
                .subjects
                .iter()
                .map(|s| Node::Caption {
                    text: format!(
                        "{}: {}",
                        s.name.as_deref().unwrap_or_default(),
                        s.course
                            .as_ref()
                            .and_then(|c| c.name.as_deref())
                            .unwrap_or_default()
                    ),
                })
                .collect(),
        });
        nodes
    }

    fn picks_images(&self) -> bool {
        true
    }
}
