use anyhow::{bail, Result};
use reviewflow_shared::{
    model::{Status, Submission},
    poller::{self, PollState, TokioSleeper},
};

use super::{print_json, Context};

pub async fn run(ctx: &Context, id: &str, watch: bool) -> Result<()> {
    if watch {
        return watch_until_settled(ctx, id).await;
    }

    let submission = ctx.gateway.fetch_submission_status(id).await?;
    if ctx.json {
        print_json(&submission)
    } else {
        println!("{}", render_submission(&submission));
        Ok(())
    }
}

/// Polls until the submission completes or fails, reporting each change.
pub async fn watch_until_settled(ctx: &Context, id: &str) -> Result<()> {
    let mut last = None::<Status>;
    let settled = poller::watch_until_settled(
        &ctx.gateway,
        &TokioSleeper,
        ctx.config.poll_interval,
        id,
        |state| {
            let Some(submission) = state.submission() else {
                return;
            };
            if last != Some(submission.status) {
                last = Some(submission.status);
                if !ctx.json {
                    eprintln!("{}: {}", submission.id, submission.status.label());
                }
            }
        },
    )
    .await;

    match settled {
        PollState::Completed(submission) | PollState::Failed(submission) => {
            if ctx.json {
                print_json(&submission)
            } else {
                println!("{}", render_submission(&submission));
                Ok(())
            }
        },
        PollState::Errored(err) => Err(err.into()),
        PollState::Idle | PollState::Loading | PollState::Pending(_) => {
            bail!("polling stopped before {id} was processed")
        },
    }
}

pub fn render_submission(submission: &Submission) -> String {
    let stars = submission.rating.get();
    let mut lines = vec![
        format!("Submission {} [{}]", submission.id, submission.status.label()),
        format!(
            "Rating:   {}{} ({}/5)",
            "★".repeat(usize::from(stars)),
            "☆".repeat(usize::from(5 - stars)),
            stars
        ),
        format!("Created:  {}", submission.created_at.format("%Y-%m-%d %H:%M UTC")),
        format!("Review:   {}", submission.review_text),
    ];
    match submission.status {
        Status::Pending => lines.push("Response: still processing".to_string()),
        Status::Completed => {
            if let Some(response) = submission.ai_response.as_deref() {
                lines.push(format!("Response: {response}"));
            }
        },
        Status::Failed => lines.push(format!(
            "Error:    {}",
            submission
                .error_message
                .as_deref()
                .unwrap_or("We could not process your review.")
        )),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(status: &str, extra: &str) -> Submission {
        serde_json::from_str(&format!(
            r#"{{"id":"s-1","rating":4,"review":"Solid","status":"{status}","created_at":"2024-05-01T10:00:00"{extra}}}"#
        ))
        .expect("decode submission")
    }

    #[test]
    fn completed_submission_shows_the_response() {
        let rendered = render_submission(&submission("COMPLETED", r#","user_ai_response":"Thanks!""#));
        assert_eq!(
            rendered,
            "Submission s-1 [Completed]\n\
             Rating:   ★★★★☆ (4/5)\n\
             Created:  2024-05-01 10:00 UTC\n\
             Review:   Solid\n\
             Response: Thanks!"
        );
    }

    #[test]
    fn failed_submission_falls_back_to_a_generic_error() {
        let rendered = render_submission(&submission("FAILED", ""));
        assert!(rendered.ends_with("Error:    We could not process your review."));
    }

    #[test]
    fn pending_submission_says_so() {
        let rendered = render_submission(&submission("PENDING", ""));
        assert!(rendered.contains("[Processing]"));
        assert!(rendered.ends_with("Response: still processing"));
    }
}
