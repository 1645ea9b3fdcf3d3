use color_eyre::Result;
use watchlist_config::SessionStore;

use crate::context::AppContext;
use crate::output::Output;

/// Session token management. The token is issued by the catalog's
/// identity provider and pasted in here; couchlog only stores and
/// attaches it.

pub fn run_login(
    ctx: &AppContext,
    token: Option<String>,
    username: Option<String>,
    output: &Output,
) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => rpassword::prompt_password("Session token: ")
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read token: {}", e))?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Token cannot be empty"));
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let mut session = SessionStore::new(ctx.paths.session_file());
    session
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load session: {}", e))?;
    session.set_user_token(token);
    if let Some(username) = username {
        session.set_username(username);
    }
    session
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save session: {}", e))?;

    output.success("Signed in. Your watchlist is ready: couchlog list");
    Ok(())
}

pub fn run_logout(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut session = SessionStore::new(ctx.paths.session_file());
    session
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load session: {}", e))?;

    if session.user_token().is_none() {
        output.info("Not signed in");
        return Ok(());
    }

    session.clear_user_token();
    session
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save session: {}", e))?;
    output.success("Signed out");
    Ok(())
}

pub fn run_whoami(ctx: &AppContext, output: &Output) -> Result<()> {
    if !ctx.is_signed_in() {
        output.info("Not signed in");
        return Ok(());
    }
    match ctx.session.username() {
        Some(username) => output.info(format!("Signed in as {}", username)),
        None => output.info("Signed in (no display name stored)"),
    }
    Ok(())
}
