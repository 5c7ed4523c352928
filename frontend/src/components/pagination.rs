use reviewflow_shared::pagination::{PageSlot, Pagination as PageView};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub view: PageView,
    pub on_page_change: Callback<u64>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let view = &props.view;
    let range_label = view.range_label();
    let Some(slots) = view.controls.clone() else {
        return html! {
            if let Some(label) = range_label {
                <p class="text-sm text-[var(--muted)]">{ label }</p>
            }
        };
    };

    let current_page = view.current_page;
    let on_page_change = props.on_page_change.clone();

    let prev_onclick = {
        let on_page_change = on_page_change.clone();
        let enabled = view.has_previous();
        Callback::from(move |_| {
            if enabled {
                on_page_change.emit(current_page - 1);
            }
        })
    };

    let next_onclick = {
        let on_page_change = on_page_change.clone();
        let enabled = view.has_next();
        Callback::from(move |_| {
            if enabled {
                on_page_change.emit(current_page + 1);
            }
        })
    };

    let base_btn_classes = classes!(
        "inline-flex",
        "items-center",
        "justify-center",
        "min-w-[2.5rem]",
        "h-10",
        "px-3",
        "rounded-lg",
        "border",
        "border-[var(--border)]",
        "bg-[rgba(var(--surface-rgb),0.95)]",
        "text-[var(--text)]",
        "text-sm",
        "font-semibold",
        "shadow-sm",
        "transition-all",
        "duration-200",
        "hover:border-[var(--primary)]",
        "hover:text-[var(--primary)]",
        "disabled:opacity-50",
        "disabled:cursor-not-allowed"
    );

    html! {
        <div class="flex flex-wrap items-center justify-between gap-3">
            if let Some(label) = range_label {
                <p class="text-sm text-[var(--muted)]">{ label }</p>
            }
            <nav class="flex flex-wrap items-center gap-2" aria-label="Pagination">
                <button
                    type="button"
                    class={base_btn_classes.clone()}
                    disabled={!view.has_previous()}
                    onclick={prev_onclick}
                    aria-label="Previous page"
                >
                    {"Previous"}
                </button>
                { for slots.into_iter().enumerate().map(|(index, slot)| match slot {
                    PageSlot::Page(page) => {
                        let is_current = page == current_page;
                        let page_classes = classes!(
                            base_btn_classes.clone(),
                            is_current.then_some("bg-[var(--primary)] text-white border-transparent pointer-events-none")
                        );
                        let onclick = {
                            let on_page_change = on_page_change.clone();
                            Callback::from(move |_| on_page_change.emit(page))
                        };
                        html! {
                            <button
                                key={format!("page-{page}")}
                                type="button"
                                class={page_classes}
                                aria-label={format!("Go to page {page}")}
                                aria-current={is_current.then(|| AttrValue::from("page"))}
                                disabled={is_current}
                                {onclick}
                            >
                                { page }
                            </button>
                        }
                    },
                    PageSlot::Ellipsis => html! {
                        <span
                            key={format!("ellipsis-{index}")}
                            class="px-2 select-none text-[var(--muted)]"
                            aria-hidden="true"
                        >
                            {"..."}
                        </span>
                    },
                }) }
                <button
                    type="button"
                    class={base_btn_classes}
                    disabled={!view.has_next()}
                    onclick={next_onclick}
                    aria-label="Next page"
                >
                    {"Next"}
                </button>
            </nav>
        </div>
    }
}
