use reviewflow_shared::Status;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: Status,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let base = classes!(
        "inline-flex",
        "items-center",
        "rounded-full",
        "px-2",
        "py-0.5",
        "text-xs",
        "font-semibold",
        "uppercase",
        "tracking-[0.06em]"
    );
    let class = match props.status {
        Status::Pending => classes!(base, "bg-amber-500/15", "text-amber-700", "dark:text-amber-200"),
        Status::Completed => {
            classes!(base, "bg-emerald-500/15", "text-emerald-700", "dark:text-emerald-200")
        },
        Status::Failed => classes!(base, "bg-red-500/15", "text-red-700", "dark:text-red-200"),
    };

    html! { <span {class}>{ props.status.label() }</span> }
}
