#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::state::session::{Role, Session};
    use leptos::*;

    pub fn admin_session() -> Session {
        Session {
            user_id: Some(1),
            username: Some("admin".into()),
            role: Role::Admin,
        }
    }

    pub fn employee_session() -> Session {
        Session {
            user_id: Some(4),
            username: Some("asta".into()),
            role: Role::Employee,
        }
    }

    pub fn provide_session(
        session: Session,
    ) -> (ReadSignal<Session>, WriteSignal<Session>) {
        let (read, write) = create_signal(session);
        provide_context((read, write));
        (read, write)
    }

    pub fn provide_session_with_role(role: Role) -> (ReadSignal<Session>, WriteSignal<Session>) {
        let session = match role {
            Role::Admin => admin_session(),
            Role::Employee => employee_session(),
            Role::Unknown => Session::default(),
        };
        provide_session(session)
    }
}
