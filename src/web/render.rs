use crate::error::AppError;
use crate::web::controller::{Action, ActionResult};
use crate::web::view_model::{CreateRoomViewModel, RoomListViewModel, NEW_ROOM_NAME_FIELD};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tera::{Context, Tera};

pub trait Render {
    /// Template rendered when the view result names no view.
    const TEMPLATE: &'static str;

    fn context(&self) -> Context;
}

impl Render for CreateRoomViewModel {
    const TEMPLATE: &'static str = "create.html";

    fn context(&self) -> Context {
        let mut context = Context::new();
        context.insert("title", "Create room");
        context.insert("field", NEW_ROOM_NAME_FIELD);
        context.insert(
            "new_room_name",
            self.new_room_name.as_deref().unwrap_or_default(),
        );
        context.insert(
            "field_errors",
            &self.model_state.errors_for(NEW_ROOM_NAME_FIELD),
        );
        context.insert(
            "summary_errors",
            &self.model_state.errors_except(NEW_ROOM_NAME_FIELD),
        );
        context.insert("create_path", Action::Create.path());
        context.insert("list_path", Action::List.path());
        context
    }
}

impl Render for RoomListViewModel {
    const TEMPLATE: &'static str = "list.html";

    fn context(&self) -> Context {
        let room_names = self
            .rooms
            .iter()
            .map(|room| room.name.as_str())
            .collect::<Vec<_>>();
        let mut context = Context::new();
        context.insert("title", "Rooms");
        context.insert("room_names", &room_names);
        context.insert("create_path", Action::Create.path());
        context
    }
}

/// Turns controller results into HTML pages or redirects.
pub struct Views {
    templates: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut templates = Tera::default();
        templates.add_raw_templates(vec![
            ("layout.html", include_str!("../../templates/layout.html")),
            ("create.html", include_str!("../../templates/create.html")),
            ("list.html", include_str!("../../templates/list.html")),
        ])?;
        templates.autoescape_on(vec![".html"]);
        Ok(Self { templates })
    }

    pub fn render_model<M: Render>(
        &self,
        view_name: Option<&str>,
        model: &M,
    ) -> Result<String, tera::Error> {
        self.templates
            .render(view_name.unwrap_or(M::TEMPLATE), &model.context())
    }

    pub fn respond<M: Render>(&self, result: ActionResult<M>) -> Result<Response, AppError> {
        match result {
            ActionResult::View(view) => {
                let html = self.render_model(view.view_name, &view.model)?;
                Ok(Html(html).into_response())
            }
            ActionResult::Redirect(redirect) => {
                tracing::debug!(action = redirect.action.name(), "redirecting");
                Ok(Redirect::to(redirect.action.path()).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::Room;
    use crate::web::view_model::ROOM_NAME_REQUIRED;

    fn views() -> Views {
        Views::new().expect("templates should parse")
    }

    #[test]
    fn create_form_shows_submitted_value_and_errors() {
        let mut view_model = CreateRoomViewModel::with_name("   ");
        view_model.validate_model();

        let body = views()
            .render_model(None, &view_model)
            .expect("create view should render");
        assert!(body.contains("value=\"   \""));
        assert!(body.contains(ROOM_NAME_REQUIRED));
        assert!(body.contains("action=\"/rooms/create\""));
    }

    #[test]
    fn create_form_escapes_submitted_value() {
        let view_model = CreateRoomViewModel::with_name("\"><b>hi</b>");

        let body = views()
            .render_model(None, &view_model)
            .expect("create view should render");
        assert!(body.contains("value=\"&quot;&gt;&lt;b&gt;hi&lt;"));
        assert!(!body.contains("<b>hi</b>"));
    }

    #[test]
    fn create_form_shows_errors_for_other_keys() {
        let mut view_model = CreateRoomViewModel::with_name("new room");
        view_model
            .model_state
            .add_model_error("Room name", "Room name is taken.");
        view_model.validate_model();

        let body = views()
            .render_model(None, &view_model)
            .expect("create view should render");
        assert!(body.contains("<li>Room name is taken.</li>"));
    }

    #[test]
    fn room_list_escapes_names() {
        let view_model = RoomListViewModel {
            rooms: vec![Room::new("<script>")],
        };
        let body = views()
            .render_model(None, &view_model)
            .expect("list view should render");
        assert!(body.contains("<li>&lt;script&gt;</li>"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn empty_room_list_has_placeholder() {
        let body = views()
            .render_model(None, &RoomListViewModel::default())
            .expect("list view should render");
        assert!(body.contains("No rooms yet."));
    }

    #[test]
    fn unknown_view_name_is_an_error() {
        let result = views().render_model(Some("missing.html"), &RoomListViewModel::default());
        assert!(result.is_err());
    }
}
