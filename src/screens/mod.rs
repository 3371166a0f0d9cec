//! Screens are thin consumers of [`ScreenDataBinder`]: each one names its
//! read, decodes the response and maps ready data to nodes.

mod grades;
mod profile;
mod student_detail;
mod student_profile;
mod teacher_courses;
mod teacher_profile;
mod teachers;

pub use grades::GradesScreen;
pub use student_detail::AdminStudentDetailScreen;
pub use student_profile::StudentProfileScreen;
pub use teacher_courses::{TeacherCoursesScreen, NO_COURSES_NOTICE};
pub use teacher_profile::TeacherProfileScreen;
pub use teachers::AdminTeachersScreen;

use crate::binder::{ReadTicket, Resolution, ScreenDataBinder, WriteResolution, WriteTicket};
use crate::error::{BinderError, ClientError, HostError};
use crate::graphql::Operation;
use crate::view::{Node, View};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

/// The signed-in user. Screens get it as an argument, never from globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub dni: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenKind {
    Grades,
    AdminTeachers,
    AdminStudentDetail,
    TeacherCourses,
    TeacherProfile,
    StudentProfile,
}

impl ScreenKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "grades" => Some(ScreenKind::Grades),
            "adminTeachers" => Some(ScreenKind::AdminTeachers),
            "adminStudentDetail" => Some(ScreenKind::AdminStudentDetail),
            "teacherCourses" => Some(ScreenKind::TeacherCourses),
            "teacherProfile" => Some(ScreenKind::TeacherProfile),
            "studentProfile" => Some(ScreenKind::StudentProfile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenKind::Grades => "grades",
            ScreenKind::AdminTeachers => "adminTeachers",
            ScreenKind::AdminStudentDetail => "adminStudentDetail",
            ScreenKind::TeacherCourses => "teacherCourses",
            ScreenKind::TeacherProfile => "teacherProfile",
            ScreenKind::StudentProfile => "studentProfile",
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ScreenKind::Grades | ScreenKind::AdminTeachers | ScreenKind::AdminStudentDetail => {
                Role::Admin
            }
            ScreenKind::TeacherCourses | ScreenKind::TeacherProfile => Role::Teacher,
            ScreenKind::StudentProfile => Role::Student,
        }
    }
}

/// Transient, never-persisted UI state of one screen instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalState {
    pub selected_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteIntent {
    pub title: String,
    pub message: String,
    pub operation: Operation,
}

pub trait ScreenSpec {
    type Data;

    fn kind(&self) -> ScreenKind;
    fn read(&self) -> Operation;
    fn decode(&self, data: &serde_json::Value) -> Result<Self::Data, ClientError>;
    fn render(&self, data: &Self::Data, local: &LocalState) -> Vec<Node>;

    fn delete(&self, _data: &Self::Data, _record_id: &str) -> Result<DeleteIntent, HostError> {
        Err(HostError::Unsupported {
            kind: self.kind().as_str().to_string(),
            action: "delete",
        })
    }

    fn save_picture(&self, _data: &Self::Data, _picture: &str) -> Option<Operation> {
        None
    }

    fn picks_images(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRead {
    pub ticket: ReadTicket,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub ticket: WriteTicket,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Refetch(PendingRead),
    Failed(ClientError),
    Discarded,
}

/// Object-safe face of a bound screen, so the host can keep a mix of kinds.
pub trait MountedScreen {
    fn kind(&self) -> ScreenKind;
    fn load(&mut self) -> Result<PendingRead, BinderError>;
    fn complete_read(
        &mut self,
        ticket: ReadTicket,
        outcome: Result<serde_json::Value, ClientError>,
    ) -> Resolution;
    fn view(&self) -> View;
    fn delete_intent(&self, record_id: &str) -> Result<DeleteIntent, HostError>;
    fn begin_write(&mut self, operation: Operation) -> Result<PendingWrite, HostError>;
    fn complete_write(
        &mut self,
        ticket: WriteTicket,
        outcome: Result<serde_json::Value, ClientError>,
    ) -> WriteOutcome;
    fn select_image(&mut self, uri: String) -> Result<(), HostError>;
    fn selected_image(&self) -> Option<&str>;
    fn begin_save_picture(&mut self) -> Result<PendingWrite, HostError>;
    fn write_in_flight(&self) -> bool;
    fn last_write_error(&self) -> Option<&ClientError>;
    fn unmount(&mut self);
}

pub struct Screen<S: ScreenSpec> {
    spec: S,
    binder: ScreenDataBinder<S::Data>,
    local: LocalState,
    // Picture carried by the in-flight EditStudent, if any.
    saving_image: Option<String>,
}

impl<S: ScreenSpec> Screen<S> {
    pub fn new(spec: S) -> Self {
        Self {
            spec,
            binder: ScreenDataBinder::new(),
            local: LocalState::default(),
            saving_image: None,
        }
    }

    fn unsupported(&self, action: &'static str) -> HostError {
        HostError::Unsupported {
            kind: self.spec.kind().as_str().to_string(),
            action,
        }
    }
}

impl<S: ScreenSpec> MountedScreen for Screen<S> {
    fn kind(&self) -> ScreenKind {
        self.spec.kind()
    }

    fn load(&mut self) -> Result<PendingRead, BinderError> {
        let ticket = self.binder.load()?;
        Ok(PendingRead {
            ticket,
            operation: self.spec.read(),
        })
    }

    fn complete_read(
        &mut self,
        ticket: ReadTicket,
        outcome: Result<serde_json::Value, ClientError>,
    ) -> Resolution {
        let decoded = outcome.and_then(|data| self.spec.decode(&data));
        if let Err(e) = &decoded {
            tracing::warn!(
                screen = self.spec.kind().as_str(),
                generation = ticket.generation(),
                error = %e,
                "read failed"
            );
        }
        self.binder.resolve_read(ticket, decoded)
    }

    fn view(&self) -> View {
        self.binder
            .render(|data| self.spec.render(data, &self.local))
    }

    fn delete_intent(&self, record_id: &str) -> Result<DeleteIntent, HostError> {
        let Some(data) = self.binder.data() else {
            return Err(HostError::Binder(BinderError::NotReady));
        };
        self.spec.delete(data, record_id)
    }

    fn begin_write(&mut self, operation: Operation) -> Result<PendingWrite, HostError> {
        let ticket = self.binder.begin_write()?;
        Ok(PendingWrite { ticket, operation })
    }

    fn complete_write(
        &mut self,
        ticket: WriteTicket,
        outcome: Result<serde_json::Value, ClientError>,
    ) -> WriteOutcome {
        let resolution = self.binder.resolve_write(ticket, outcome.map(|_| ()));
        let saved = match resolution {
            WriteResolution::Discarded => None,
            _ => self.saving_image.take(),
        };
        match resolution {
            WriteResolution::Refetch(read) => {
                // Only the saved pick is spent; a newer one stays pending.
                if saved.is_some() && saved == self.local.selected_image {
                    self.local.selected_image = None;
                }
                WriteOutcome::Refetch(PendingRead {
                    ticket: read,
                    operation: self.spec.read(),
                })
            }
            WriteResolution::Failed(e) => WriteOutcome::Failed(e),
            WriteResolution::Discarded => WriteOutcome::Discarded,
        }
    }

    fn select_image(&mut self, uri: String) -> Result<(), HostError> {
        if !self.spec.picks_images() {
            return Err(self.unsupported("pickImage"));
        }
        self.local.selected_image = Some(uri);
        Ok(())
    }

    fn selected_image(&self) -> Option<&str> {
        self.local.selected_image.as_deref()
    }

    fn begin_save_picture(&mut self) -> Result<PendingWrite, HostError> {
        let Some(data) = self.binder.data() else {
            return Err(HostError::Binder(BinderError::NotReady));
        };
        let Some(picture) = self.local.selected_image.clone() else {
            return Err(HostError::NoSelection);
        };
        let operation = self
            .spec
            .save_picture(data, &picture)
            .ok_or_else(|| self.unsupported("savePicture"))?;
        let pending = self.begin_write(operation)?;
        self.saving_image = Some(picture);
        Ok(pending)
    }

    fn write_in_flight(&self) -> bool {
        self.binder.write_in_flight()
    }

    fn last_write_error(&self) -> Option<&ClientError> {
        self.binder.last_write_error()
    }

    fn unmount(&mut self) {
        self.binder.unmount();
    }
}

/// Builds the screen for `kind`. Identity and route parameters come in
/// explicitly; nothing is looked up from ambient state.
pub fn open(
    kind: ScreenKind,
    identity: &Identity,
    route: &serde_json::Value,
) -> Result<Box<dyn MountedScreen>, HostError> {
    if identity.role != kind.role() {
        return Err(HostError::Forbidden {
            kind: kind.as_str().to_string(),
            role: identity.role.as_str().to_string(),
        });
    }
    let screen: Box<dyn MountedScreen> = match kind {
        ScreenKind::Grades => Box::new(Screen::new(GradesScreen)),
        ScreenKind::AdminTeachers => Box::new(Screen::new(AdminTeachersScreen)),
        ScreenKind::AdminStudentDetail => {
            let Some(id) = route.get("_id").and_then(|v| v.as_str()) else {
                return Err(HostError::MissingParam("params._id"));
            };
            Box::new(Screen::new(AdminStudentDetailScreen::new(id)))
        }
        ScreenKind::TeacherCourses => {
            Box::new(Screen::new(TeacherCoursesScreen::new(&identity.dni)))
        }
        ScreenKind::TeacherProfile => {
            Box::new(Screen::new(TeacherProfileScreen::new(&identity.dni)))
        }
        ScreenKind::StudentProfile => {
            Box::new(Screen::new(StudentProfileScreen::new(&identity.dni)))
        }
    };
    Ok(screen)
}
