use reviewflow_shared::AnalyticsView;
use yew::prelude::*;

use crate::components::stats_card::StatsCard;

#[derive(Properties, PartialEq)]
pub struct AnalyticsPanelProps {
    pub view: AnalyticsView,
}

#[function_component(AnalyticsPanel)]
pub fn analytics_panel(props: &AnalyticsPanelProps) -> Html {
    let view = &props.view;

    html! {
        <section class="space-y-6" aria-label="Analytics">
            <div class="grid grid-cols-2 gap-4 md:grid-cols-4">
                <StatsCard label="Total" value={view.cards.total} />
                <StatsCard label="Processing" value={view.cards.pending} accent={classes!("text-amber-600")} />
                <StatsCard label="Completed" value={view.cards.completed} accent={classes!("text-emerald-600")} />
                <StatsCard label="Failed" value={view.cards.failed} accent={classes!("text-red-600")} />
            </div>

            <div class="grid gap-6 md:grid-cols-2">
                <div>
                    <h3 class="mb-3 text-sm font-semibold text-[var(--muted)]">{"Rating distribution"}</h3>
                    <ul class="space-y-2">
                        { for view.ratings.iter().map(|bar| html! {
                            <li key={bar.rating} class="flex items-center gap-3 text-sm">
                                <span class="w-12 shrink-0">{ format!("{} ★", bar.rating) }</span>
                                <div class="h-3 flex-1 rounded bg-[var(--surface-alt)]">
                                    <div
                                        class="h-3 rounded bg-[var(--primary)]"
                                        style={format!("width: {}%;", bar.percent)}
                                    />
                                </div>
                                <span class="w-20 shrink-0 text-right text-[var(--muted)]">
                                    { format!("{} ({}%)", bar.count, bar.percent) }
                                </span>
                            </li>
                        }) }
                    </ul>
                </div>

                <div>
                    <h3 class="mb-3 text-sm font-semibold text-[var(--muted)]">{"Submissions per day"}</h3>
                    if view.days.is_empty() {
                        <p class="text-sm text-[var(--muted)]">{"No submissions yet."}</p>
                    } else {
                        <div class="flex h-40 items-end gap-1">
                            { for view.days.iter().map(|day| html! {
                                <div
                                    key={day.label.clone()}
                                    class="flex flex-1 flex-col items-center justify-end gap-1"
                                    title={format!("{}: {}", day.label, day.count)}
                                >
                                    <div
                                        class="w-full rounded-t bg-[var(--primary)]"
                                        style={format!("height: {}%;", view.day_height_percent(day.count))}
                                    />
                                    <span class="text-[10px] text-[var(--muted)]">{ day.label.clone() }</span>
                                </div>
                            }) }
                        </div>
                    }
                </div>
            </div>
        </section>
    }
}
