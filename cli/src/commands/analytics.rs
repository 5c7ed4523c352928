use anyhow::{anyhow, Result};
use reviewflow_shared::{
    admin::{AdminQueryController, LoadState},
    AnalyticsView,
};

use super::{list::admin_error, print_json, Context};

const BAR_WIDTH: usize = 20;

pub async fn run(ctx: &Context) -> Result<()> {
    let mut controller = AdminQueryController::new(&ctx.config, ctx.gateway.session().clone());
    let request = controller.refresh().analytics;
    match controller.load_analytics(&ctx.gateway, request).await {
        LoadState::Ready(snapshot) => {
            if ctx.json {
                return print_json(snapshot);
            }
            println!("{}", render_analytics(&AnalyticsView::from(snapshot)));
            Ok(())
        },
        LoadState::Errored(err) => Err(admin_error(err)),
        LoadState::Idle | LoadState::Loading => Err(anyhow!("analytics did not complete")),
    }
}

fn bar(percent: u8) -> String {
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

pub fn render_analytics(view: &AnalyticsView) -> String {
    let cards = view.cards;
    let mut lines = vec![
        format!(
            "Total {} | Processing {} | Completed {} | Failed {}",
            cards.total, cards.pending, cards.completed, cards.failed
        ),
        String::new(),
        "Ratings".to_string(),
    ];
    lines.extend(view.ratings.iter().map(|rating| {
        format!(
            "  {} ★ {} {} ({}%)",
            rating.rating,
            bar(rating.percent),
            rating.count,
            rating.percent
        )
    }));

    lines.push(String::new());
    lines.push("Submissions per day".to_string());
    if view.days.is_empty() {
        lines.push("  none".to_string());
    }
    lines.extend(view.days.iter().map(|day| {
        format!(
            "  {:<6} {} {}",
            day.label,
            bar(view.day_height_percent(day.count)),
            day.count
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use reviewflow_shared::AnalyticsSnapshot;

    use super::*;

    #[test]
    fn renders_cards_ratings_and_days() {
        let snapshot: AnalyticsSnapshot = serde_json::from_str(
            r#"{
                "counts_by_rating": {"5": 3, "1": 1},
                "counts_by_status": {"COMPLETED": 3, "FAILED": 1},
                "submissions_per_day": [
                    {"date": "2024-05-02", "count": 1},
                    {"date": "2024-05-01", "count": 3}
                ]
            }"#,
        )
        .expect("decode snapshot");

        let rendered = render_analytics(&AnalyticsView::from(&snapshot));
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Total 4 | Processing 0 | Completed 3 | Failed 1");
        assert_eq!(lines[3], format!("  1 ★ {}{} 1 (25%)", "█".repeat(5), " ".repeat(15)));
        assert_eq!(lines[4], format!("  2 ★ {} 0 (0%)", " ".repeat(20)));
        assert_eq!(lines[7], format!("  5 ★ {}{} 3 (75%)", "█".repeat(15), " ".repeat(5)));
        assert_eq!(lines[10], format!("  May 1  {} 3", "█".repeat(20)));
        assert_eq!(lines[11], format!("  May 2  {}{} 1", "█".repeat(6), " ".repeat(14)));
    }

    #[test]
    fn empty_snapshot_still_renders() {
        let rendered = render_analytics(&AnalyticsView::from(&AnalyticsSnapshot::default()));
        assert!(rendered.starts_with("Total 0 | Processing 0 | Completed 0 | Failed 0"));
        assert!(rendered.ends_with("Submissions per day\n  none"));
    }
}
