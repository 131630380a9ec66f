//! Demo data loaded at startup.

use rosterdesk_auth::{NewProfile, NewUser, Role};
use rosterdesk_core::DomainResult;

use crate::store::{EntityStore, SharedStore};

const DEMO_USERS: [(&str, &str, &str, Role); 3] = [
    ("João", "Silva", "joao.silva@example.com", Role::Administrador),
    ("Maria", "Santos", "maria.santos@example.com", Role::Editor),
    ("Pedro", "Oliveira", "pedro.oliveira@example.com", Role::Visitante),
];

/// What a seeding pass actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub profiles_created: usize,
    pub users_created: usize,
}

/// Insert the three role profiles and one demo user per role.
///
/// Idempotent: existing profiles (by name) and users (by email) are left alone.
pub fn seed_demo_data<S: EntityStore>(store: &SharedStore<S>) -> DomainResult<SeedReport> {
    let report = store.write(|s| -> DomainResult<SeedReport> {
        let mut report = SeedReport::default();

        for role in Role::ALL {
            if s.find_profile_by_name(role.name()).is_none() {
                s.create_profile(NewProfile::new(role.name())?);
                report.profiles_created += 1;
            }
        }

        for (first, last, email, role) in DEMO_USERS {
            if s.email_exists(email, None) {
                continue;
            }
            let Some(profile) = s.find_profile_by_name(role.name()) else {
                continue;
            };
            s.create_user(NewUser::new(first, last, email, profile.id)?);
            report.users_created += 1;
        }

        Ok(report)
    })?;

    tracing::info!(
        profiles = report.profiles_created,
        users = report.users_created,
        "demo data seeded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryEntityStore;

    #[test]
    fn seeds_once() {
        let store: SharedStore<InMemoryEntityStore> = SharedStore::default();

        let first = seed_demo_data(&store).unwrap();
        assert_eq!(first, SeedReport { profiles_created: 3, users_created: 3 });

        let second = seed_demo_data(&store).unwrap();
        assert_eq!(second, SeedReport::default());

        store.read(|s| {
            let names: Vec<_> = s.all_profiles().into_iter().map(|p| p.name).collect();
            assert_eq!(names, ["Administrador", "Editor", "Visitante"]);

            let joao = s.find_user_by_email("joao.silva@example.com").unwrap();
            assert_eq!(joao.id.as_str(), "user-1");
            assert_eq!(s.role_of(&joao.profile_id), Some(Role::Administrador));
            assert!(s.all_users().iter().all(|u| u.is_active));
        });
    }
}
