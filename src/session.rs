use crate::config::AdminCredential;
use crate::error::SchoolResult;
use crate::model::{Dataset, Identity, Role};
use crate::store::RecordStore;
use tracing::info;

pub const ADMIN_ID: &str = "admin";
pub const ADMIN_NAME: &str = "Administrator";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    /// Picks up an identity persisted by an earlier run.
    pub fn restore(store: &RecordStore) -> Self {
        match store.load_current_user() {
            Some(identity) => Session::Authenticated(identity),
            None => Session::Anonymous,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(identity) => Some(identity),
        }
    }

    /// On success the identity is persisted and the session becomes
    /// authenticated. On failure the session is left as it was.
    pub fn login(
        &mut self,
        store: &mut RecordStore,
        admin: &AdminCredential,
        login: &str,
        password: &str,
    ) -> SchoolResult<Option<Identity>> {
        let data = store.load_dataset();
        let Some(identity) = resolve(admin, &data, login, password) else {
            info!(login, "login rejected");
            return Ok(None);
        };
        store.save_current_user(&identity)?;
        info!(login, role = %identity.role, "login accepted");
        *self = Session::Authenticated(identity.clone());
        Ok(Some(identity))
    }

    pub fn logout(&mut self, store: &mut RecordStore) -> SchoolResult<()> {
        store.clear_current_user()?;
        if let Session::Authenticated(identity) = self {
            info!(login = %identity.login, "logged out");
        }
        *self = Session::Anonymous;
        Ok(())
    }
}

/// Matches credentials against admin, then teachers, students and parents.
/// The first match wins.
pub fn resolve(
    admin: &AdminCredential,
    data: &Dataset,
    login: &str,
    password: &str,
) -> Option<Identity> {
    let identity = |role: Role, id: &str, name: &str| Identity {
        login: login.to_string(),
        password: password.to_string(),
        role,
        name: name.to_string(),
        id: id.to_string(),
    };

    if admin.login == login && admin.password == password {
        return Some(identity(Role::Admin, ADMIN_ID, ADMIN_NAME));
    }
    if let Some(t) = data
        .teachers
        .iter()
        .find(|t| t.login == login && t.password == password)
    {
        return Some(identity(Role::Teacher, &t.id, &t.name));
    }
    if let Some(s) = data
        .students
        .iter()
        .find(|s| s.login == login && s.password == password)
    {
        return Some(identity(Role::Student, &s.id, &s.name));
    }
    data.parents
        .iter()
        .find(|p| p.login == login && p.password == password)
        .map(|p| identity(Role::Parent, &p.id, &p.name))
}
