use crate::model::{Role, Session};

/// Decide whether a session may access something gated on `required`.
///
/// Deny without a session. Otherwise allow iff the session holds at least
/// one of the required roles — OR across requirements, never AND. An
/// empty requirement list denies: there is nothing the session could
/// intersect with.
pub fn can_access(required: &[Role], session: Option<&Session>) -> bool {
    let Some(session) = session else {
        return false;
    };
    required.iter().any(|role| session.has_role(*role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(roles: &[Role]) -> Session {
        Session {
            subject: "test".into(),
            roles: roles.to_vec(),
        }
    }

    #[test]
    fn no_session_always_denies() {
        assert!(!can_access(&[Role::Admin], None));
        assert!(!can_access(&[], None));
    }

    #[test]
    fn allows_iff_intersection_nonempty() {
        let roles = [Role::Admin, Role::Manager, Role::Employee];

        // Exhaustive over all subsets of required × session roles.
        for req_mask in 0u8..8 {
            for sess_mask in 0u8..8 {
                let required: Vec<Role> = roles
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| req_mask & (1 << i) != 0)
                    .map(|(_, r)| *r)
                    .collect();
                let held: Vec<Role> = roles
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| sess_mask & (1 << i) != 0)
                    .map(|(_, r)| *r)
                    .collect();

                let expected = req_mask & sess_mask != 0;
                assert_eq!(
                    can_access(&required, Some(&session(&held))),
                    expected,
                    "required={required:?} held={held:?}"
                );
            }
        }
    }

    #[test]
    fn any_required_role_suffices() {
        let s = session(&[Role::Employee]);
        assert!(can_access(&[Role::Admin, Role::Employee], Some(&s)));
    }

    #[test]
    fn empty_roles_claim_denies() {
        let s = session(&[]);
        assert!(!can_access(&[Role::Employee], Some(&s)));
    }
}
