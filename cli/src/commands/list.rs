use anyhow::{anyhow, Result};
use reviewflow_shared::{
    admin::{AdminQueryController, FilterField, LoadState},
    model::AdminSubmissionPage,
    pagination::{PageSlot, Pagination},
    ApiError,
};

use super::{print_json, Context};

pub struct ListArgs {
    pub rating: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub page: u64,
}

pub async fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let mut controller = AdminQueryController::new(&ctx.config, ctx.gateway.session().clone());
    let filters = [
        (FilterField::Rating, args.rating),
        (FilterField::Status, args.status),
        (FilterField::Search, args.q),
    ];
    for (field, raw) in filters {
        if let Some(raw) = raw {
            controller.set_filter(field, &raw)?;
        }
    }

    let request = controller.set_page(args.page);
    controller.load_list(&ctx.gateway, request).await;
    match controller.list_state() {
        LoadState::Ready(page) => {
            if ctx.json {
                return print_json(page);
            }
            println!("{}", render_page(page, &controller.pagination()));
            Ok(())
        },
        LoadState::Errored(err) => Err(admin_error(err)),
        LoadState::Idle | LoadState::Loading => Err(anyhow!("listing did not complete")),
    }
}

/// Adds a hint to sign in again when the token is missing or was rejected.
pub fn admin_error(err: &ApiError) -> anyhow::Error {
    if err.is_auth_failure() {
        anyhow!("{}; run `rf-cli login` to sign in", err.display_message())
    } else {
        anyhow!(err.clone())
    }
}

pub fn render_page(page: &AdminSubmissionPage, pagination: &Pagination) -> String {
    if page.items.is_empty() {
        return "No submissions match these filters.".to_string();
    }

    let mut lines = page
        .items
        .iter()
        .map(|item| {
            let mut row = format!(
                "{:<10} {}  {:<10} {}  {}",
                item.short_id(),
                item.rating,
                item.status.label(),
                item.created_at.format("%Y-%m-%d %H:%M"),
                item.review_text
            );
            if let Some(summary) = item.admin_summary.as_deref() {
                row.push_str(&format!("\n    Summary: {summary}"));
            }
            for action in &item.recommended_actions {
                row.push_str(&format!("\n    - {action}"));
            }
            if let Some(error) = item.error_message.as_deref() {
                row.push_str(&format!("\n    Error: {error}"));
            }
            row
        })
        .collect::<Vec<_>>();

    lines.push(String::new());
    if let Some(label) = pagination.range_label() {
        lines.push(label);
    }
    if let Some(slots) = pagination.controls.as_deref() {
        lines.push(format!("Pages: {}", render_controls(slots, pagination.current_page)));
    }
    lines.join("\n")
}

fn render_controls(slots: &[PageSlot], current: u64) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(page) if *page == current => format!("[{page}]"),
            PageSlot::Page(page) => page.to_string(),
            PageSlot::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
