use crate::error::AppError;
use crate::rooms::RoomRepository;
use crate::web::view_model::{CreateRoomViewModel, RoomListViewModel};
use std::sync::Arc;

/// Handler actions that can be the target of a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    List,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::List => "List",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Action::Create => "/rooms/create",
            Action::List => "/rooms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResult<M> {
    /// `None` renders the action's default view.
    pub view_name: Option<&'static str>,
    pub model: M,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectToAction {
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<M> {
    View(ViewResult<M>),
    Redirect(RedirectToAction),
}

impl<M> ActionResult<M> {
    fn view(model: M) -> Self {
        ActionResult::View(ViewResult {
            view_name: None,
            model,
        })
    }

    fn redirect(action: Action) -> Self {
        ActionResult::Redirect(RedirectToAction { action })
    }
}

pub struct RoomController {
    repository: Arc<dyn RoomRepository>,
}

#[derive(Default)]
pub struct RoomControllerBuilder {
    repository: Option<Arc<dyn RoomRepository>>,
}

impl RoomControllerBuilder {
    pub fn repository(mut self, repository: Arc<dyn RoomRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn build(self) -> Result<RoomController, AppError> {
        let repository = self.repository.ok_or(AppError::MissingRepository)?;
        Ok(RoomController { repository })
    }
}

impl RoomController {
    pub fn builder() -> RoomControllerBuilder {
        RoomControllerBuilder::default()
    }

    /// GET Create: an empty form.
    pub fn create_form(&self) -> ActionResult<CreateRoomViewModel> {
        ActionResult::view(CreateRoomViewModel::default())
    }

    /// POST Create: stores the room and redirects to the list, or hands the
    /// submitted model back with its validation errors.
    pub async fn create(
        &self,
        mut view_model: CreateRoomViewModel,
    ) -> Result<ActionResult<CreateRoomViewModel>, AppError> {
        let valid = view_model.validate_model();
        match view_model.room_name().map(str::to_string) {
            Some(name) if valid => {
                self.repository.create_room(&name).await?;
                tracing::info!(room = %name, "room created");
                Ok(ActionResult::redirect(Action::List))
            }
            _ => {
                tracing::debug!(name = ?view_model.new_room_name, "rejected room submission");
                Ok(ActionResult::view(view_model))
            }
        }
    }

    pub async fn list(&self) -> Result<ActionResult<RoomListViewModel>, AppError> {
        let rooms = self.repository.list_rooms().await?;
        Ok(ActionResult::view(RoomListViewModel { rooms }))
    }
}
