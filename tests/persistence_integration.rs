//! Integration tests for session and data grid state persistence

#[cfg(test)]
mod integration_tests {
    use route_authz::pagination::{grid_id, SortDirection, STORAGE_KEY};
    use route_authz::{
        AuthModel, KeyValueStore, MemoryStore, NavError, NavigationConfig, Navigator,
        PaginationStore, PaginationUpdate, SessionStore, SessionUser,
    };
    use std::sync::{Arc, Mutex};

    /// Records every write so tests can assert on the save lifecycle
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore,
        writes: Mutex<Vec<String>>,
    }

    impl KeyValueStore for RecordingStore {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.writes.lock().unwrap().push(key.to_string());
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_grid_state_survives_reload() {
        let backend = Arc::new(RecordingStore::default());
        let orders = grid_id("SpecialOrder", "ExpertOrderList");

        {
            let mut grids = PaginationStore::new(Arc::clone(&backend));
            grids.load().unwrap();
            grids.set(&orders, PaginationUpdate::page_size(20)).unwrap();
            grids.set(&orders, PaginationUpdate::page(3)).unwrap();
            grids
                .set(&orders, PaginationUpdate::sort("createdAt", SortDirection::Desc))
                .unwrap();
        }
        assert_eq!(backend.writes.lock().unwrap().len(), 3);

        let mut grids = PaginationStore::new(Arc::clone(&backend));
        grids.load().unwrap();
        let state = grids.get(&orders);
        assert_eq!(state.page, 3);
        assert_eq!(state.page_size, 20);
        assert_eq!(state.sort_model[0].sort, SortDirection::Desc);

        let rows: Vec<u32> = (0..75).collect();
        assert_eq!(state.page_count(rows.len()), 4);
        assert_eq!(state.page_slice(&rows).first(), Some(&60));
    }

    #[test]
    fn test_reset_on_unknown_grid_does_not_write() {
        let backend = Arc::new(RecordingStore::default());
        let mut grids = PaginationStore::new(Arc::clone(&backend));
        grids.reset("never-touched").unwrap();
        assert!(backend.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_session_and_pagination_share_backend() {
        let backend = MemoryStore::new();
        let session = SessionStore::new(backend.clone());
        let mut grids = PaginationStore::new(backend.clone());

        session
            .set_auth(&AuthModel {
                api_token: "abc".to_string(),
                refresh_token: None,
            })
            .unwrap();
        grids.set("users", PaginationUpdate::search("karimi")).unwrap();

        assert_eq!(backend.len(), 2);
        assert!(backend.get(STORAGE_KEY).unwrap().is_some());

        session.clear().unwrap();
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_session_roles_drive_navigation() {
        let nav = Navigator::new(
            NavigationConfig::from_json(
                r#"{
                    "routes": {
                        "Home":    { "path": "/home", "title": "Home" },
                        "Payroll": { "path": "/payroll", "title": "Payroll", "roles": ["HR Manager"] }
                    },
                    "sidebar": [
                        { "kind": "item", "title": "Home", "to": "/home" },
                        { "kind": "item", "title": "Payroll", "to": "/payroll", "roles": ["HR Manager"] }
                    ]
                }"#,
            )
            .unwrap(),
        )
        .unwrap();

        let session = SessionStore::new(MemoryStore::new());
        assert!(!nav.authorize("/payroll", &session.current_roles().unwrap()).is_allowed());

        session
            .set_user(&SessionUser {
                name: "s.ahmadi".to_string(),
                full_name: Some("Sara Ahmadi".to_string()),
                roles: ["HR Manager", "Employee"].into(),
            })
            .unwrap();

        let roles = session.current_roles().unwrap();
        assert!(nav.authorize("/payroll", &roles).is_allowed());
        assert_eq!(nav.sidebar_for(&roles).len(), 2);

        session.clear().unwrap();
        assert_eq!(nav.sidebar_for(&session.current_roles().unwrap()).len(), 1);
    }

    #[test]
    fn test_storage_failure_surfaces_as_error() {
        struct ReadOnly;

        impl KeyValueStore for ReadOnly {
            fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
                Ok(None)
            }

            fn set(&self, key: &str, _value: &str) -> anyhow::Result<()> {
                anyhow::bail!("read-only store, cannot write {}", key)
            }

            fn remove(&self, _key: &str) -> anyhow::Result<()> {
                Ok(())
            }
        }

        let session = SessionStore::new(ReadOnly);
        let err = session
            .set_auth(&AuthModel {
                api_token: "t".to_string(),
                refresh_token: None,
            })
            .unwrap_err();

        assert!(matches!(err, NavError::Storage { ref message } if message.contains("cannot write auth")));
        assert!(!err.is_configuration());
    }
}
