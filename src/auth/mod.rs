//! Authentication flow.
//!
//! Reuse a cached session when a settings file exists, otherwise perform a
//! fresh credential login. A cached session that turns out to be expired is
//! retried exactly once with a forced re-login that keeps only the cached
//! `device_id`. There is no wider retry policy.

use std::path::Path;

use crate::api::SavedMediaApi;
use crate::error::{Error, Result};
use crate::output::{print_info, print_success, print_warning};
use crate::session::{store, SessionState};

/// Login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Where the session comes from on this run.
enum SessionSource {
    FreshLogin,
    Cached(SessionState),
}

/// Establish an authenticated session, persisting it after any (re)login.
pub async fn authenticate<A: SavedMediaApi + ?Sized>(
    api: &A,
    creds: &Credentials,
    settings_path: &Path,
) -> Result<SessionState> {
    let source = match store::load(settings_path)? {
        Some(cached) => SessionSource::Cached(cached),
        None => {
            print_warning(&format!(
                "Unable to find file: {}",
                settings_path.display()
            ));
            SessionSource::FreshLogin
        }
    };

    match source {
        SessionSource::FreshLogin => {
            let state = api.login(&creds.username, &creds.password, None).await?;
            persist(settings_path, &state)?;
            Ok(state)
        }
        SessionSource::Cached(cached) => {
            print_info(&format!("Reusing settings: {}", settings_path.display()));

            // Only the device id survives an expired session
            let device_id = cached.device_id().map(str::to_owned);

            match api.resume(cached).await {
                Ok(state) => Ok(state),
                Err(Error::SessionExpired(reason)) => {
                    print_warning(&format!("Session expired ({}), logging in again", reason));

                    let state = api
                        .login(&creds.username, &creds.password, device_id.as_deref())
                        .await?;
                    persist(settings_path, &state)?;
                    Ok(state)
                }
                Err(e) => Err(e),
            }
        }
    }
}

fn persist(settings_path: &Path, state: &SessionState) -> Result<()> {
    store::save(settings_path, state)?;
    print_success(&format!("SAVED: {}", settings_path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use std::sync::atomic::Ordering;
    use tempfile::tempdir;

    fn creds() -> Credentials {
        Credentials {
            username: "someuser".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_absent_settings_does_fresh_login_and_saves() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let api = MockApi::new();

        let state = authenticate(&api, &creds(), &path).await.unwrap();

        let login_calls = api.login_calls.lock().unwrap();
        assert_eq!(login_calls.as_slice(), &[None]);
        assert_eq!(api.resume_calls.load(Ordering::SeqCst), 0);

        // Session was persisted to the given path
        let saved = store::load(&path).unwrap().unwrap();
        assert_eq!(saved, state);
    }

    #[tokio::test]
    async fn test_valid_settings_reuses_session_without_login() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let api = MockApi::new();

        // Seed a cached session file
        let cached = api.login("someuser", "hunter2", Some("android-cached")).await.unwrap();
        store::save(&path, &cached).unwrap();
        api.login_calls.lock().unwrap().clear();

        let state = authenticate(&api, &creds(), &path).await.unwrap();

        assert!(api.login_calls.lock().unwrap().is_empty());
        assert_eq!(api.resume_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state, cached);
    }

    #[tokio::test]
    async fn test_expired_session_relogs_in_with_cached_device_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let seed = MockApi::new();
        let cached = seed
            .login("someuser", "hunter2", Some("android-cached"))
            .await
            .unwrap();
        store::save(&path, &cached).unwrap();

        let api =
            MockApi::new().fail_resume_with(Error::SessionExpired("login_required".to_string()));

        let state = authenticate(&api, &creds(), &path).await.unwrap();

        // Re-login happened once, carrying the cached device id
        let login_calls = api.login_calls.lock().unwrap();
        assert_eq!(login_calls.as_slice(), &[Some("android-cached".to_string())]);
        assert_eq!(api.resume_calls.load(Ordering::SeqCst), 1);

        // Fresh session overwrote the settings file
        let saved = store::load(&path).unwrap().unwrap();
        assert_eq!(saved, state);
        assert_eq!(saved.device_id(), Some("android-cached"));
    }

    #[tokio::test]
    async fn test_credential_failure_is_not_retried() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let seed = MockApi::new();
        let cached = seed.login("someuser", "hunter2", None).await.unwrap();
        store::save(&path, &cached).unwrap();

        let api = MockApi::new().fail_resume_with(Error::Login("bad_password".to_string()));

        let err = authenticate(&api, &creds(), &path).await.unwrap_err();
        assert!(matches!(err, Error::Login(_)));
        assert!(api.login_calls.lock().unwrap().is_empty());
    }
}
