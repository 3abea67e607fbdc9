use crate::{api::ProfileUpdate, state::session::Session};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub old_password: String,
    pub new_password: String,
    pub change_password: bool,
}

impl ProfileForm {
    pub fn from_session(session: Option<&Session>) -> Self {
        let Some(session) = session else {
            return Self::default();
        };
        Self {
            first_name: session.first_name.clone().unwrap_or_default(),
            last_name: session.last_name.clone().unwrap_or_default(),
            email: session.email.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Passwords are included only while a password change is requested.
    pub fn to_update(&self) -> ProfileUpdate {
        let (old_password, new_password) = if self.change_password {
            (
                Some(self.old_password.clone()),
                Some(self.new_password.clone()),
            )
        } else {
            (None, None)
        };
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            old_password,
            new_password,
        }
    }

    pub fn toggle_password_change(&mut self) {
        self.change_password = !self.change_password;
        if !self.change_password {
            self.old_password.clear();
            self.new_password.clear();
        }
    }
}
