use anyhow::Result;

use super::{print_json, status, Context};

pub async fn run(ctx: &Context, rating: u8, review: &str, watch: bool) -> Result<()> {
    let receipt = ctx.gateway.submit_review(rating, review).await?;
    tracing::info!(id = %receipt.submission_id, "review submitted");

    if ctx.json && !watch {
        return print_json(&receipt);
    }
    if !ctx.json {
        println!(
            "Submitted {} ({})",
            receipt.submission_id,
            receipt.initial_status.label()
        );
    }
    if watch {
        status::watch_until_settled(ctx, &receipt.submission_id).await?;
    }
    Ok(())
}
