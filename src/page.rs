//! In-memory stand-in for the page the controller drives.
//!
//! Each field corresponds to an element id the controller depends on:
//! `searchInput`, `searchResults`, `addPasswordForm`, `editPasswordForm`
//! (with `editEntryId` and its fields), the `addPasswordModal` and
//! `editPasswordModal` containers, and every `toggle-password-btn`.

use std::collections::HashMap;

use crate::model::EntryForm;

pub const ADD_PASSWORD_INPUT: &str = "addPassword";
pub const EDIT_PASSWORD_INPUT: &str = "editPassword";

const SHOW_LABEL: &str = "Show";
const HIDE_LABEL: &str = "Hide";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Password,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub target_input: String,
    pub label: String,
}

impl ToggleButton {
    pub fn new(target_input: &str) -> Self {
        ToggleButton {
            target_input: target_input.to_owned(),
            label: SHOW_LABEL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    /// `editEntryId`; only ever holds an id the backend handed out.
    pub entry_id: Option<i64>,
    pub fields: EntryForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub search_input: String,
    pub search_results: String,
    pub add_form: EntryForm,
    pub add_modal_open: bool,
    pub edit_form: EditForm,
    pub edit_modal_open: bool,
    pub toggle_buttons: Vec<ToggleButton>,
    password_inputs: HashMap<String, InputType>,
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl Page {
    /// A page with both password inputs and a toggle for each.
    pub fn new() -> Self {
        let mut page = Page {
            search_input: String::new(),
            search_results: String::new(),
            add_form: EntryForm::default(),
            add_modal_open: false,
            edit_form: EditForm::default(),
            edit_modal_open: false,
            toggle_buttons: vec![],
            password_inputs: HashMap::new(),
        };
        for input in &[ADD_PASSWORD_INPUT, EDIT_PASSWORD_INPUT] {
            page.password_inputs.insert((*input).to_owned(), InputType::Password);
            page.toggle_buttons.push(ToggleButton::new(input));
        }
        page
    }

    pub fn input_type(&self, id: &str) -> Option<InputType> {
        self.password_inputs.get(id).copied()
    }

    /// Flip the input a toggle button targets. Returns false, and changes
    /// nothing, when the button or its target does not exist.
    pub fn toggle_password(&mut self, button: usize) -> bool {
        let button = match self.toggle_buttons.get_mut(button) {
            Some(b) => b,
            None => return false,
        };
        let input = match self.password_inputs.get_mut(&button.target_input) {
            Some(i) => i,
            None => return false,
        };
        match *input {
            InputType::Password => {
                *input = InputType::Text;
                button.label = HIDE_LABEL.to_owned();
            }
            InputType::Text => {
                *input = InputType::Password;
                button.label = SHOW_LABEL.to_owned();
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_type_and_label() {
        let mut page = Page::new();
        assert!(page.toggle_password(1));
        assert_eq!(page.input_type(EDIT_PASSWORD_INPUT), Some(InputType::Text));
        assert_eq!(page.toggle_buttons[1].label, "Hide");
        assert!(page.toggle_password(1));
        assert_eq!(page.input_type(EDIT_PASSWORD_INPUT), Some(InputType::Password));
        assert_eq!(page.toggle_buttons[1].label, "Show");
        assert_eq!(page.input_type(ADD_PASSWORD_INPUT), Some(InputType::Password));
    }

    #[test]
    fn toggle_with_missing_target_is_ignored() {
        let mut page = Page::new();
        page.toggle_buttons.push(ToggleButton::new("nope"));
        let before = page.clone();
        assert!(!page.toggle_password(2));
        assert!(!page.toggle_password(10));
        assert_eq!(page, before);
    }
}
