// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Login form submitted with (username, password)
    Submit { username: String, password: String },
}

/// Which login field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Admin login form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    /// Password shown as bullets
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match key {
            KeyCode::Esc => ModalAction::Close,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                ModalAction::None
            }
            // Enter on the username field moves on; on the password field it submits
            KeyCode::Enter => match self.focus {
                LoginField::Username => {
                    self.focus = LoginField::Password;
                    ModalAction::None
                }
                LoginField::Password => ModalAction::Submit {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                },
            },
            KeyCode::Backspace => {
                self.focused_mut().pop();
                ModalAction::None
            }
            KeyCode::Char(c) => {
                self.focused_mut().push(c);
                ModalAction::None
            }
            _ => ModalAction::None,
        }
    }
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Admin login dialog
    Login(LoginForm),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn login() -> Self {
        Modal::Login(LoginForm::default())
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Login(form) => form.handle_input(key),
        }
    }

    /// Clear the password after a failed attempt, keeping the username
    pub fn reject_login(&mut self) {
        if let Modal::Login(form) = self {
            form.password.clear();
            form.focus = LoginField::Password;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(modal: &mut Modal, text: &str) {
        for c in text.chars() {
            assert_eq!(modal.handle_input(KeyCode::Char(c)), ModalAction::None);
        }
    }

    #[test]
    fn test_login_typing_and_submit() {
        let mut modal = Modal::login();
        type_str(&mut modal, "admin");
        modal.handle_input(KeyCode::Enter);
        type_str(&mut modal, "s3cret!");
        modal.handle_input(KeyCode::Backspace);

        assert_eq!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::Submit {
                username: "admin".to_string(),
                password: "s3cret".to_string(),
            }
        );
    }

    #[test]
    fn test_q_is_text_in_login_but_closes_help() {
        let mut login = Modal::login();
        assert_eq!(login.handle_input(KeyCode::Char('q')), ModalAction::None);
        assert_eq!(login.handle_input(KeyCode::Esc), ModalAction::Close);

        assert_eq!(Modal::help().handle_input(KeyCode::Char('q')), ModalAction::Close);
    }

    #[test]
    fn test_reject_clears_password_only() {
        let mut modal = Modal::login();
        type_str(&mut modal, "admin");
        modal.handle_input(KeyCode::Tab);
        type_str(&mut modal, "wrong");
        modal.reject_login();

        let Modal::Login(form) = &modal else {
            panic!("expected login modal");
        };
        assert_eq!(form.username, "admin");
        assert!(form.password.is_empty());
        assert_eq!(form.focus, LoginField::Password);
    }

    #[test]
    fn test_password_is_masked() {
        let form = LoginForm {
            password: "abc".to_string(),
            ..LoginForm::default()
        };
        assert_eq!(form.masked_password(), "•••");
    }
}
