//! Repository behaviour over both graph backends.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;
use tripledao::graph::{MemoryGraph, SharedGraph, SqliteGraph, TripleSink, TripleSource};
use tripledao::mapping::UriAllocator;
use tripledao::mapping::vocab::{
    EMAIL_ADDRESS, HAS_PERMISSION_SET, PASSWORD_CHANGE_REQUIRED, PERMISSION_SET, RDF_TYPE,
    RDFS_LABEL,
};
use tripledao::store::{GraphUserAccountsStore, UserAccountsStore};
use tripledao::types::{AccountStatus, Iri, Literal, PermissionSet, Term, Triple, UserAccount};

const NS: &str = "http://vivo.example.org/individual/";

fn memory_store() -> GraphUserAccountsStore<MemoryGraph> {
    GraphUserAccountsStore::new(Arc::new(SharedGraph::new(MemoryGraph::new())), NS)
        .with_allocator(UriAllocator::with_seed(11))
}

fn sqlite_store(temp: &TempDir) -> GraphUserAccountsStore<SqliteGraph> {
    let graph = SqliteGraph::new(temp.path().join("graph.db")).unwrap();
    graph.initialize().unwrap();
    GraphUserAccountsStore::new(Arc::new(SharedGraph::new(graph)), NS)
        .with_allocator(UriAllocator::with_seed(11))
}

fn full_account() -> UserAccount {
    UserAccount {
        uri: None,
        email_address: Some("a@example.com".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        password_hash: Some("$argon2id$hash".to_string()),
        old_password_hash: Some("5f4dcc3b5aa765d61d8327deb882cf99".to_string()),
        password_link_expires: 1_700_000_000_000,
        password_change_required: true,
        login_count: 12,
        status: Some(AccountStatus::Active),
        external_auth_id: Some("netid-ada".to_string()),
        permission_set_uris: vec![Iri::new(format!("{NS}ps-admin"))],
    }
}

fn snapshot<G: TripleSink>(graph: &SharedGraph<G>) -> Vec<Triple> {
    let mut triples: Vec<_> = graph
        .with_read(|g| g.find(None, None, None).map(|it| it.collect::<Vec<_>>()))
        .unwrap();
    triples.sort();
    triples
}

fn check_insert_round_trip(store: &impl UserAccountsStore) {
    let input = full_account();
    let mut account = input.clone();

    let uri = store.insert_user_account(&mut account).unwrap().unwrap();
    assert!(uri.as_str().starts_with(NS));
    assert_eq!(account.uri.as_ref(), Some(&uri));

    let read_back = store.get_user_account(Some(uri.as_str())).unwrap().unwrap();
    assert_eq!(read_back.uri.as_ref(), Some(&uri));
    assert_eq!(
        UserAccount {
            uri: None,
            ..read_back
        },
        input
    );
}

#[test]
fn test_insert_then_get_round_trips_memory() {
    check_insert_round_trip(&memory_store());
}

#[test]
fn test_insert_then_get_round_trips_sqlite() {
    let temp = TempDir::new().unwrap();
    check_insert_round_trip(&sqlite_store(&temp));
}

#[test]
fn test_update_is_idempotent() {
    let store = memory_store();
    let mut account = full_account();
    store.insert_user_account(&mut account).unwrap().unwrap();

    account.first_name = Some("Augusta".to_string());
    account.password_change_required = false;
    account.permission_set_uris = vec![
        Iri::new(format!("{NS}ps-editor")),
        Iri::new(format!("{NS}ps-self")),
    ];

    store.update_user_account(&account).unwrap();
    let once = snapshot(store.graph());
    store.update_user_account(&account).unwrap();
    let twice = snapshot(store.graph());

    assert_eq!(once, twice);
    let uri = account.uri.as_ref().unwrap().as_str();
    let read_back = store.get_user_account(Some(uri)).unwrap().unwrap();
    assert_eq!(read_back.first_name.as_deref(), Some("Augusta"));
    assert!(!read_back.password_change_required);
    let sets: HashSet<_> = read_back.permission_set_uris.into_iter().collect();
    assert_eq!(sets.len(), 2);
}

#[test]
fn test_update_never_changes_uri() {
    let store = memory_store();
    let mut account = full_account();
    let uri = store.insert_user_account(&mut account).unwrap().unwrap();

    account.email_address = Some("new@example.com".to_string());
    store.update_user_account(&account).unwrap();

    let accounts = store.list_user_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].uri.as_ref(), Some(&uri));
    assert!(store.get_user_account_by_email(Some("a@example.com")).unwrap().is_none());
}

#[test]
fn test_delete_then_get_is_absent() {
    let temp = TempDir::new().unwrap();
    let store = sqlite_store(&temp);
    let mut account = full_account();
    let uri = store.insert_user_account(&mut account).unwrap().unwrap();

    store.delete_user_account(Some(uri.as_str())).unwrap();
    assert!(store.get_user_account(Some(uri.as_str())).unwrap().is_none());

    let never_existed = format!("{NS}n999999");
    store.delete_user_account(Some(&never_existed)).unwrap();
    assert!(store.get_user_account(Some(&never_existed)).unwrap().is_none());

    store.delete_user_account(None).unwrap();
    assert!(store.get_user_account(None).unwrap().is_none());
}

#[test]
fn test_delete_leaves_inbound_references() {
    let store = memory_store();
    let mut set = PermissionSet {
        label: Some("Editors".to_string()),
        ..Default::default()
    };
    let set_uri = store.insert_permission_set(&mut set).unwrap().unwrap();

    let mut account = UserAccount {
        email_address: Some("e@example.com".to_string()),
        permission_set_uris: vec![set_uri.clone()],
        ..Default::default()
    };
    let account_uri = store.insert_user_account(&mut account).unwrap().unwrap();

    store.delete_permission_set(Some(set_uri.as_str())).unwrap();
    assert!(store.get_permission_set(Some(set_uri.as_str())).unwrap().is_none());

    // The dangling reference is tolerated on read.
    let read_back = store.get_user_account(Some(account_uri.as_str())).unwrap().unwrap();
    assert_eq!(read_back.permission_set_uris, vec![set_uri]);
}

#[test]
fn test_password_change_required_statement_counts() {
    let store = memory_store();
    let mut account = UserAccount::default();
    let uri = store.insert_user_account(&mut account).unwrap().unwrap();
    let count = || {
        store
            .graph()
            .with_read(|g| {
                g.find(Some(&uri), Some(&PASSWORD_CHANGE_REQUIRED), None)
                    .map(Iterator::count)
            })
            .unwrap()
    };

    account.password_change_required = false;
    store.update_user_account(&account).unwrap();
    assert_eq!(count(), 0);
    let read_back = store.get_user_account(Some(uri.as_str())).unwrap().unwrap();
    assert!(!read_back.password_change_required);

    account.password_change_required = true;
    store.update_user_account(&account).unwrap();
    assert_eq!(count(), 1);
    let read_back = store.get_user_account(Some(uri.as_str())).unwrap().unwrap();
    assert!(read_back.password_change_required);
}

#[test]
fn test_list_skips_untyped_resources() {
    let store = memory_store();
    let mut account = full_account();
    store.insert_user_account(&mut account).unwrap().unwrap();

    // Account-shaped, but missing the type statement.
    let impostor = Iri::new(format!("{NS}impostor"));
    store
        .graph()
        .with_write(|g| {
            g.add(Triple::new(
                impostor.clone(),
                EMAIL_ADDRESS,
                Literal::string("impostor@example.com"),
            ))?;
            g.add(Triple::new(impostor.clone(), HAS_PERMISSION_SET, Iri::new(format!("{NS}ps"))))
        })
        .unwrap();

    let accounts = store.list_user_accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].uri, account.uri);
    assert!(store.get_user_account(Some(impostor.as_str())).unwrap().is_none());
    assert!(
        store
            .get_user_account_by_email(Some("impostor@example.com"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_sequential_inserts_get_distinct_uris() {
    let temp = TempDir::new().unwrap();
    let store = sqlite_store(&temp);
    let mut seen = HashSet::new();

    for i in 0..200 {
        let mut account = UserAccount {
            email_address: Some(format!("user{i}@example.com")),
            ..Default::default()
        };
        let uri = store.insert_user_account(&mut account).unwrap().unwrap();
        assert!(seen.insert(uri));
    }
    assert_eq!(store.list_user_accounts().unwrap().len(), 200);
}

#[test]
fn test_get_by_email() {
    let store = memory_store();
    let mut account = UserAccount {
        email_address: Some("a@example.com".to_string()),
        ..Default::default()
    };
    let uri = store.insert_user_account(&mut account).unwrap().unwrap();

    let found = store.get_user_account_by_email(Some("a@example.com")).unwrap().unwrap();
    assert_eq!(found.uri, Some(uri));
    assert!(store.get_user_account_by_email(Some("b@example.com")).unwrap().is_none());
    assert!(store.get_user_account_by_email(None).unwrap().is_none());
}

#[test]
fn test_get_by_external_auth_id() {
    let temp = TempDir::new().unwrap();
    let store = sqlite_store(&temp);
    let mut account = full_account();
    let uri = store.insert_user_account(&mut account).unwrap().unwrap();

    let found = store
        .get_user_account_by_external_auth_id(Some("netid-ada"))
        .unwrap()
        .unwrap();
    assert_eq!(found.uri, Some(uri));
    assert!(
        store
            .get_user_account_by_external_auth_id(Some("netid-bob"))
            .unwrap()
            .is_none()
    );
    assert!(store.get_user_account_by_external_auth_id(None).unwrap().is_none());
}

#[test]
fn test_permission_sets_are_sorted_by_uri() {
    let store = memory_store();
    store
        .graph()
        .with_write(|g| {
            for (local, label) in [("n5", "Five"), ("n2", "Two")] {
                let uri = Iri::new(format!("{NS}{local}"));
                g.add(Triple::new(uri.clone(), RDF_TYPE, PERMISSION_SET))?;
                g.add(Triple::new(uri, RDFS_LABEL, Literal::string(label)))?;
            }
            Ok::<_, tripledao::error::Error>(())
        })
        .unwrap();

    let sets = store.list_permission_sets().unwrap();
    let uris: Vec<_> = sets.iter().map(|s| s.uri.clone().unwrap().into_string()).collect();
    assert_eq!(uris, vec![format!("{NS}n2"), format!("{NS}n5")]);
    assert_eq!(sets[0].label.as_deref(), Some("Two"));
}

#[test]
fn test_sqlite_permission_sets_are_sorted_by_uri() {
    let temp = TempDir::new().unwrap();
    let store = sqlite_store(&temp);
    for label in ["A", "B", "C", "D"] {
        let mut set = PermissionSet {
            label: Some(label.to_string()),
            ..Default::default()
        };
        store.insert_permission_set(&mut set).unwrap().unwrap();
    }

    let uris: Vec<_> = store
        .list_permission_sets()
        .unwrap()
        .into_iter()
        .map(|s| s.uri.unwrap())
        .collect();
    let mut sorted = uris.clone();
    sorted.sort();
    assert_eq!(uris.len(), 4);
    assert_eq!(uris, sorted);
}

#[test]
fn test_permission_set_update() {
    let store = memory_store();
    let mut set = PermissionSet {
        label: Some("Editors".to_string()),
        permission_uris: vec![Iri::new("urn:permission:edit")],
        ..Default::default()
    };
    let uri = store.insert_permission_set(&mut set).unwrap().unwrap();

    set.label = Some("Curators".to_string());
    set.permission_uris = vec![Iri::new("urn:permission:curate")];
    store.update_permission_set(&set).unwrap();

    let read_back = store.get_permission_set(Some(uri.as_str())).unwrap().unwrap();
    assert_eq!(read_back, set);

    let missing = PermissionSet {
        uri: Some(Iri::new(format!("{NS}missing"))),
        ..Default::default()
    };
    assert!(matches!(
        store.update_permission_set(&missing),
        Err(tripledao::error::Error::NotFound(_))
    ));
}

#[test]
fn test_accounts_with_permission_set() {
    let store = memory_store();
    let admin = Iri::new(format!("{NS}ps-admin"));
    for (email, sets) in [
        ("a@example.com", vec![admin.clone()]),
        ("b@example.com", vec![]),
        ("c@example.com", vec![admin.clone(), Iri::new(format!("{NS}ps-other"))]),
    ] {
        let mut account = UserAccount {
            email_address: Some(email.to_string()),
            permission_set_uris: sets,
            ..Default::default()
        };
        store.insert_user_account(&mut account).unwrap().unwrap();
    }

    let members = store
        .list_user_accounts_with_permission_set(Some(admin.as_str()))
        .unwrap();
    let mut emails: Vec<_> = members
        .iter()
        .filter_map(|a| a.email_address.clone())
        .collect();
    emails.sort();
    assert_eq!(emails, vec!["a@example.com", "c@example.com"]);
    assert!(
        members
            .windows(2)
            .all(|pair| pair[0].uri <= pair[1].uri)
    );
    assert!(store.list_user_accounts_with_permission_set(None).unwrap().is_empty());
}

#[test]
fn test_concurrent_inserts_and_reads() {
    let store = Arc::new(memory_store());

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let mut account = UserAccount {
                        email_address: Some(format!("w{t}-{i}@example.com")),
                        login_count: i,
                        ..Default::default()
                    };
                    store.insert_user_account(&mut account).unwrap().unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..25 {
                for account in store.list_user_accounts().unwrap() {
                    // Never a half-written record: the email is written in
                    // the same scope as the type statement.
                    assert!(account.email_address.is_some());
                }
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(store.list_user_accounts().unwrap().len(), 100);
    let object = Term::Literal(Literal::string("w3-24@example.com"));
    assert!(
        store
            .graph()
            .with_read(|g| g.contains(None, Some(&EMAIL_ADDRESS), Some(&object)))
            .unwrap()
    );
}
