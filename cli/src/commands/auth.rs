use anyhow::{Context as _, Result};
use reviewflow_shared::session;

use super::Context;

pub async fn login(ctx: &Context, username: &str, password: &str) -> Result<()> {
    session::login(&ctx.gateway, username, password)
        .await
        .context("login failed")?;
    println!("Logged in as {username}");
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    session::logout(ctx.gateway.session());
    println!("Logged out");
    Ok(())
}
