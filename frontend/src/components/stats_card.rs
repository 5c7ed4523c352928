use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsCardProps {
    pub label: AttrValue,
    pub value: u64,
    #[prop_or_default]
    pub accent: Classes,
}

#[function_component(StatsCard)]
pub fn stats_card(props: &StatsCardProps) -> Html {
    html! {
        <div class={classes!("stats-card", "rounded-xl", "border", "border-[var(--border)]", "p-4", props.accent.clone())} role="status">
            <span class="block text-xs uppercase tracking-[0.06em] text-[var(--muted)]">{ props.label.clone() }</span>
            <strong class="stats-card-value text-2xl">{ props.value }</strong>
        </div>
    }
}
