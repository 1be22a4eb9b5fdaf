//! Form descriptors built from schemas.
//!
//! A [`Form`] binds a [`SchemaNode`] to a set of action buttons. Rendering is left to the
//! caller; forms serialize to JSON so that a template or frontend can draw them.

use heck::ToTitleCase;
use serde::{Deserialize, Serialize};

use crate::schema::SchemaNode;

/// The action buttons attached to a form, chosen by create-vs-edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSet {
    /// Buttons for entering a new document.
    Create,
    /// Buttons for editing an existing document.
    Edit,
}

impl ButtonSet {
    pub const CREATE_BUTTONS: [&'static str; 2] = ["submit", "cancel"];
    pub const EDIT_BUTTONS: [&'static str; 3] = ["submit", "cancel", "delete"];

    /// Returns [`ButtonSet::Create`] when `entry` is set, [`ButtonSet::Edit`] otherwise.
    pub fn for_entry(entry: bool) -> Self {
        if entry {
            ButtonSet::Create
        } else {
            ButtonSet::Edit
        }
    }

    /// Returns the button names in display order.
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            ButtonSet::Create => &Self::CREATE_BUTTONS,
            ButtonSet::Edit => &Self::EDIT_BUTTONS,
        }
    }

    /// Builds the buttons of this set.
    pub fn buttons(&self) -> Vec<Button> {
        self.names().iter().map(|name| Button::new(name)).collect()
    }
}

/// The HTML type of a form button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Submit,
}

/// A single action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    /// Submitted with the form when this button is pressed. Defaults to the name.
    pub value: String,
}

impl Button {
    /// Creates a submit button titled after its name (`"delete"` -> `"Delete"`).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: name.to_title_case(),
            kind: ButtonKind::Submit,
            value: name.to_string(),
        }
    }
}

/// Form-level settings.
///
/// Deserializable from configuration; every field has a default.
///
/// # Example
///
/// ```ignore
/// let options: FormOptions = serde_json::from_str(r#"{ "action": "/people" }"#)?;
/// assert_eq!(options.method, "POST");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOptions {
    /// The id attribute of the rendered form.
    #[serde(default = "default_formid")]
    pub formid: String,
    /// The URL the form posts to. Empty posts back to the current page.
    #[serde(default)]
    pub action: String,
    /// The HTTP method used to submit the form.
    #[serde(default = "default_method")]
    pub method: String,
}

impl FormOptions {
    pub fn with_formid(mut self, formid: impl Into<String>) -> Self {
        self.formid = formid.into();
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            formid: default_formid(),
            action: String::new(),
            method: default_method(),
        }
    }
}

fn default_formid() -> String {
    "deform".to_string()
}

fn default_method() -> String {
    "POST".to_string()
}

/// A form bound to a schema and a set of buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub formid: String,
    pub action: String,
    pub method: String,
    pub schema: SchemaNode,
    pub buttons: Vec<Button>,
}

impl Form {
    /// Creates a form with default options.
    pub fn new(schema: SchemaNode, buttons: ButtonSet) -> Self {
        Self::with_options(schema, buttons, &FormOptions::default())
    }

    /// Creates a form with the given options.
    pub fn with_options(schema: SchemaNode, buttons: ButtonSet, options: &FormOptions) -> Self {
        Self {
            formid: options.formid.clone(),
            action: options.action.clone(),
            method: options.method.clone(),
            schema,
            buttons: buttons.buttons(),
        }
    }

    /// Returns the button names in display order.
    pub fn button_names(&self) -> Vec<&str> {
        self.buttons.iter().map(|button| button.name.as_str()).collect()
    }

    /// Returns `true` if the form has a button with the given name.
    pub fn has_button(&self, name: &str) -> bool {
        self.buttons.iter().any(|button| button.name == name)
    }
}
