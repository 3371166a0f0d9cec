//! Serializable view tree handed to the front end. Layout and styling are
//! the front end's business; this only says what is on screen.

use serde::Serialize;

pub const LOADING_LABEL: &str = "Cargando...";
pub const ERROR_MESSAGE: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum View {
    Loading { label: String },
    Error { message: String },
    Ready { nodes: Vec<Node> },
}

impl View {
    pub fn loading() -> Self {
        View::Loading {
            label: LOADING_LABEL.to_string(),
        }
    }

    pub fn error() -> Self {
        View::Error {
            message: ERROR_MESSAGE.to_string(),
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            View::Loading { .. } => "loading",
            View::Error { .. } => "error",
            View::Ready { .. } => "ready",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Link(Button),
    #[serde(rename_all = "camelCase")]
    Card {
        key: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_press: Option<Action>,
        actions: Vec<Button>,
    },
    #[serde(rename_all = "camelCase")]
    Avatar {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        picture: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_press: Option<Action>,
    },
    Heading {
        text: String,
    },
    Caption {
        text: String,
    },
    Field {
        label: String,
        value: String,
    },
    Section {
        title: String,
        items: Vec<Node>,
    },
    Notice {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    /// Handed to the front end's router as-is.
    Navigate {
        route: String,
        params: serde_json::Value,
    },
    #[serde(rename_all = "camelCase")]
    RequestDelete { record_id: String },
    PickImage,
    SavePicture,
    Logout,
}

impl Action {
    pub fn navigate(route: &str, params: serde_json::Value) -> Self {
        Action::Navigate {
            route: route.to_string(),
            params,
        }
    }
}

pub fn link(label: &str, route: &str) -> Node {
    Node::Link(Button::new(
        label,
        Action::navigate(route, serde_json::Value::Null),
    ))
}

pub fn field(label: &str, value: Option<&str>) -> Node {
    Node::Field {
        label: label.to_string(),
        value: value.unwrap_or_default().to_string(),
    }
}
