use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::{Deserialize, Serialize};

use crate::config::Args;
use crate::model::{BackendClient, SyncError, User};

const TOKEN_FILE: &str = "token.json";
/// Cached tokens older than this are not even tried
const TOKEN_MAX_AGE_DAYS: i64 = 7;

#[derive(Clone, Debug)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedToken {
    token: String,
    saved_at: DateTime<Utc>,
}

fn token_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(TOKEN_FILE)
}

/// Token saved by a previous run, unless it is missing, unreadable or stale
pub fn load_cached_token(cache_dir: &Path) -> Option<String> {
    let content = fs::read_to_string(token_path(cache_dir)).ok()?;
    let cached: CachedToken = serde_json::from_str(&content).ok()?;

    if Utc::now() - cached.saved_at > Duration::days(TOKEN_MAX_AGE_DAYS) {
        tracing::debug!(saved_at = %cached.saved_at, "Cached token is stale");
        return None;
    }
    Some(cached.token)
}

pub fn save_token(cache_dir: &Path, token: &str) -> Result<()> {
    fs::create_dir_all(cache_dir)?;
    let cached = CachedToken {
        token: token.to_string(),
        saved_at: Utc::now(),
    };
    fs::write(token_path(cache_dir), serde_json::to_string(&cached)?)?;
    tracing::debug!("Saved session token to disk");
    Ok(())
}

/// Forget the cached session
pub fn logout(cache_dir: &Path) -> Result<()> {
    let path = token_path(cache_dir);
    if path.exists() {
        fs::remove_file(path)?;
    }
    tracing::info!("Logged out, cached token removed");
    Ok(())
}

/// Try the cached token against the backend. A rejected token is deleted.
pub async fn resume_session(backend: &BackendClient, cache_dir: &Path) -> Result<Option<AuthResult>> {
    let Some(token) = load_cached_token(cache_dir) else {
        return Ok(None);
    };

    backend.set_token(Some(token.clone())).await;
    match backend.me().await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Resumed cached session");
            Ok(Some(AuthResult { token, user }))
        }
        Err(SyncError::Unauthenticated) => {
            tracing::warn!("Cached token rejected, signing in again");
            backend.set_token(None).await;
            logout(cache_dir)?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Sign in (or sign up) with credentials and cache the resulting token
pub async fn sign_in(
    backend: &BackendClient,
    cache_dir: &Path,
    name: Option<&str>,
    email: &str,
    password: &str,
) -> Result<AuthResult> {
    let (token, user) = match name {
        Some(name) => backend.register(name, email, password).await?,
        None => backend.login(email, password).await?,
    };

    backend.set_token(Some(token.clone())).await;
    if let Err(e) = save_token(cache_dir, &token) {
        tracing::warn!(error = %e, "Could not cache session token");
    }
    tracing::info!(user_id = %user.id, "Signed in");
    Ok(AuthResult { token, user })
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Like `prompt`, but keeps the terminal from echoing what is typed
fn prompt_hidden(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    enable_raw_mode()?;
    let keys = std::iter::from_fn(|| loop {
        match event::read() {
            Ok(Event::Key(key)) => return Some(Ok(key)),
            Ok(_) => continue,
            Err(e) => return Some(Err(e)),
        }
    });
    let secret = read_secret(keys);
    disable_raw_mode()?;

    println!();
    secret
}

/// Collect a line from key events until Enter. Esc or Ctrl+C abort.
fn read_secret(keys: impl IntoIterator<Item = io::Result<KeyEvent>>) -> Result<String> {
    let mut secret = String::new();
    for key in keys {
        let key = key?;
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(anyhow::anyhow!("Sign-in cancelled"));
            }
            KeyCode::Esc => return Err(anyhow::anyhow!("Sign-in cancelled")),
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
    Err(anyhow::anyhow!("Input closed before Enter"))
}

/// Resume the cached session or ask for credentials on the terminal.
/// Runs before the TUI takes over the screen.
pub async fn authenticate(backend: &BackendClient, cache_dir: &Path, args: &Args) -> Result<AuthResult> {
    if !args.signup {
        if let Some(result) = resume_session(backend, cache_dir).await? {
            return Ok(result);
        }
    }

    let name = if args.signup {
        Some(match &args.name {
            Some(name) => name.clone(),
            None => prompt("Name")?,
        })
    } else {
        None
    };
    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt("Email")?,
    };
    let password = match std::env::var("MELODY_PASSWORD") {
        Ok(password) => password,
        Err(_) => prompt_hidden("Password")?,
    };

    if email.is_empty() || password.is_empty() {
        return Err(anyhow::anyhow!("Email and password are required"));
    }

    sign_in(backend, cache_dir, name.as_deref(), &email, &password).await
}
