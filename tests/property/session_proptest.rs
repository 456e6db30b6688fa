//! Property-based tests for session persistence

use proptest::prelude::*;
use studyreel::client::session::{TOKEN_KEY, USER_KEY};
use studyreel::client::{KeyValueStore, MemoryStore, SessionStore};
use studyreel::shared::models::User;

fn user_strategy() -> impl Strategy<Value = User> {
    (
        "[a-f0-9]{24}",
        "[A-Za-z ]{1,30}",
        "[a-z]{1,10}@[a-z]{1,10}\\.com",
        proptest::option::of("https://[a-z]{3,10}\\.com/[a-z]{1,8}\\.png"),
    )
        .prop_map(|(id, name, email, profile_picture)| User {
            id,
            name,
            email,
            profile_picture,
        })
}

proptest! {
    #[test]
    fn test_restore_matches_established(user in user_strategy(), token in "[A-Za-z0-9._-]{1,64}") {
        let mut store = SessionStore::init(MemoryStore::new());
        let established = store.establish_session(user, token).unwrap().clone();

        let restored = SessionStore::init(store.into_store());
        prop_assert_eq!(restored.session(), Some(&established));
    }

    #[test]
    fn test_sign_out_always_clears(
        user in proptest::option::of(user_strategy()),
        token in "[A-Za-z0-9]{1,32}",
    ) {
        let mut store = SessionStore::init(MemoryStore::new());
        if let Some(user) = user {
            store.establish_session(user, token).unwrap();
        }

        store.sign_out();

        prop_assert!(store.user().is_none());
        prop_assert!(store.token().is_none());
        prop_assert_eq!(store.store().get(TOKEN_KEY).unwrap(), None);
        prop_assert_eq!(store.store().get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_garbage_user_record_fails_closed(token in "[A-Za-z0-9]{1,32}", garbage in "[^{]{0,40}") {
        let store = MemoryStore::with_entries([(TOKEN_KEY, token), (USER_KEY, garbage)]);

        let session = SessionStore::init(store);
        prop_assert!(session.session().is_none());
        prop_assert!(session.store().is_empty());
    }
}
