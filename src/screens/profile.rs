use crate::view::{field, link, Action, Button, Node};

pub(super) struct ProfileCard<'a> {
    pub name: String,
    pub role_label: &'a str,
    pub picture: Option<String>,
    pub pickable: bool,
    pub email: Option<&'a str>,
    pub dni: Option<&'a str>,
    pub address: Option<&'a str>,
}

pub(super) fn header(card: &ProfileCard<'_>) -> Vec<Node> {
    vec![
        Node::Avatar {
            name: card.name.clone(),
            picture: card.picture.clone(),
            on_press: card.pickable.then_some(Action::PickImage),
        },
        Node::Heading {
            text: card.name.clone(),
        },
        Node::Caption {
            text: card.role_label.to_string(),
        },
    ]
}

/// Links shown on the signed-in user's own profile.
pub(super) fn own_profile_links() -> Vec<Node> {
    vec![
        link("EDITAR PERFIL", "EditProfile"),
        link("EDITAR CLAVE", "ResetPass"),
        Node::Link(Button::new("CERRAR SESIÓN", Action::Logout)),
    ]
}

pub(super) fn contact_fields(card: &ProfileCard<'_>) -> Vec<Node> {
    vec![
        field("Correo", card.email),
        field("DNI", card.dni),
        field("Dirección", card.address),
    ]
}
