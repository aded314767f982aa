use crate::rooms::Room;
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const NEW_ROOM_NAME_FIELD: &str = "new_room_name";
pub const ROOM_NAME_REQUIRED: &str = "Room name is required.";

/// Validation errors keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelState {
    errors: ValidationErrors,
}

impl ModelState {
    pub fn add_model_error(&mut self, key: &'static str, message: &'static str) {
        let mut error = ValidationError::new("model");
        error.message = Some(Cow::Borrowed(message));
        self.errors.add(key, error);
    }

    /// Keeps errors already recorded for a field and adds the rest.
    fn merge(&mut self, errors: ValidationErrors) {
        for (field, kind) in errors.into_errors() {
            self.errors.errors_mut().entry(field).or_insert(kind);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.errors().is_empty()
    }

    pub fn errors_for(&self, key: &str) -> Vec<String> {
        self.errors
            .field_errors()
            .get(key)
            .map(|errors| errors.iter().map(error_message).collect())
            .unwrap_or_default()
    }

    /// Messages recorded under any key other than `key`, ordered by key.
    pub fn errors_except(&self, key: &str) -> Vec<String> {
        let mut fields = self
            .errors
            .field_errors()
            .into_iter()
            .filter(|(field, _)| *field != key)
            .collect::<Vec<_>>();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        fields
            .into_iter()
            .flat_map(|(_, errors)| errors.iter().map(error_message))
            .collect()
    }
}

fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

fn validate_room_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Form input for the room creation page. Field names match the posted form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct CreateRoomViewModel {
    #[validate(
        required(message = "Room name is required."),
        custom(function = "validate_room_name", message = "Room name is required.")
    )]
    pub new_room_name: Option<String>,
    #[serde(skip)]
    pub model_state: ModelState,
}

impl CreateRoomViewModel {
    #[cfg(test)]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            new_room_name: Some(name.into()),
            model_state: ModelState::default(),
        }
    }

    /// The trimmed room name, or `None` when it is missing or blank.
    pub fn room_name(&self) -> Option<&str> {
        self.new_room_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Runs the field rules and records their errors in the model state.
    pub fn validate_model(&mut self) -> bool {
        if let Err(errors) = Validate::validate(&*self) {
            self.model_state.merge(errors);
        }
        self.model_state.is_valid()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomListViewModel {
    pub rooms: Vec<Room>,
}
