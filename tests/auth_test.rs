use intel_platform::auth::MIN_BCRYPT_COST;
use intel_platform::db::init_db;
use intel_platform::{AuthService, PasswordScheme, Repository, Session, SessionState};
use std::sync::Arc;
use tempfile::TempDir;

const SCHEMES: [PasswordScheme; 2] = [
    PasswordScheme::Bcrypt {
        cost: MIN_BCRYPT_COST,
    },
    PasswordScheme::Sha256,
];

async fn setup_auth(scheme: PasswordScheme) -> (AuthService, Arc<Repository>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let db = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(db));
    (AuthService::new(repo.clone(), scheme), repo, temp_dir)
}

#[test]
fn test_verify_matches_only_own_password() {
    let passwords = ["correct horse", "Tr0ub4dor&3", "", "ünïcødé", "a,b,c"];

    for scheme in SCHEMES {
        for password in passwords {
            let hash = scheme.hash(password).unwrap();
            assert!(scheme.verify(password, &hash), "{:?} {:?}", scheme, password);

            for other in passwords.iter().filter(|p| **p != password) {
                assert!(
                    !scheme.verify(other, &hash),
                    "{:?} accepted {:?} for {:?}",
                    scheme,
                    other,
                    password
                );
            }
        }
    }
}

#[tokio::test]
async fn test_register_then_login_for_each_scheme() {
    for scheme in SCHEMES {
        let (auth, _repo, _temp) = setup_auth(scheme).await;

        assert!(auth.register("analyst1", "hunter22").await.unwrap());
        let user = auth.login("analyst1", "hunter22").await.unwrap();
        assert_eq!(user.map(|u| u.username), Some("analyst1".to_string()));
    }
}

#[tokio::test]
async fn test_duplicate_register_leaves_original_row() {
    let (auth, repo, _temp) = setup_auth(PasswordScheme::Sha256).await;

    assert!(auth
        .register_with_role("admin1", "original", "admin")
        .await
        .unwrap());
    let original = repo.get_user_by_username("admin1").await.unwrap().unwrap();

    assert!(!auth.register("admin1", "takeover").await.unwrap());

    let current = repo.get_user_by_username("admin1").await.unwrap().unwrap();
    assert_eq!(current, original);
    assert_eq!(repo.get_all_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_session_transitions() {
    let (auth, _repo, _temp) = setup_auth(PasswordScheme::Sha256).await;
    auth.register("alice", "wonderland").await.unwrap();

    let mut session = Session::new();
    assert_eq!(session.state(), &SessionState::Anonymous);

    assert!(!session.login(&auth, "alice", "wrong").await.unwrap());
    assert!(!session.is_authenticated());

    assert!(session.login(&auth, "alice", "wonderland").await.unwrap());
    assert!(session.is_authenticated());
    assert_eq!(session.current_user().unwrap().username, "alice");

    session.logout();
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let (auth, _repo, _temp) = setup_auth(PasswordScheme::Sha256).await;
    auth.register("alice", "wonderland").await.unwrap();

    let mut first = Session::new();
    let second = Session::new();

    first.login(&auth, "alice", "wonderland").await.unwrap();
    assert!(first.is_authenticated());
    assert!(!second.is_authenticated());
}

#[tokio::test]
async fn test_login_with_other_scheme_hash_fails() {
    let (sha_auth, repo, _temp) = setup_auth(PasswordScheme::Sha256).await;
    sha_auth.register("legacy", "secret99").await.unwrap();

    let bcrypt_auth = AuthService::new(
        repo,
        PasswordScheme::Bcrypt {
            cost: MIN_BCRYPT_COST,
        },
    );
    assert!(bcrypt_auth.login("legacy", "secret99").await.unwrap().is_none());
}
