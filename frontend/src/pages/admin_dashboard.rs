use std::{cell::RefCell, collections::HashSet, rc::Rc};

use reviewflow_shared::{
    admin::{AdminQueryController, Applied, AnalyticsRequest, FilterField, ListRequest},
    model::{AdminSubmissionSummary, Rating, Status},
    session, AnalyticsView,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::{functional::UseForceUpdateHandle, prelude::*};
use yew_router::prelude::*;

use crate::{
    api::{self, Gateway},
    components::{
        analytics_panel::AnalyticsPanel, error_banner::ErrorBanner,
        loading_spinner::LoadingSpinner, pagination::Pagination, status_badge::StatusBadge,
    },
    config,
    router::Route,
};

#[derive(Clone)]
struct DashboardHost {
    controller: Rc<RefCell<AdminQueryController>>,
    gateway: Rc<Gateway>,
    redraw: UseForceUpdateHandle,
}

impl DashboardHost {
    fn run_list(self, request: ListRequest) {
        self.redraw.force_update();
        wasm_bindgen_futures::spawn_local(async move {
            let result = request.send(&self.gateway).await;
            if let Err(err) = &result {
                web_sys::console::error_1(&format!("Listing failed: {}", err).into());
            }
            let applied = self.controller.borrow_mut().apply_list(request.seq, result);
            match applied {
                Applied::Reclamped(next) => self.run_list(next),
                Applied::Updated | Applied::Stale => self.redraw.force_update(),
            }
        });
    }

    fn run_analytics(self, request: AnalyticsRequest) {
        wasm_bindgen_futures::spawn_local(async move {
            let result = request.send(&self.gateway).await;
            if let Err(err) = &result {
                web_sys::console::error_1(&format!("Analytics failed: {}", err).into());
            }
            self.controller.borrow_mut().apply_analytics(request.seq, result);
            self.redraw.force_update();
        });
    }

    fn refresh(&self) {
        let refresh = self.controller.borrow_mut().refresh();
        self.clone().run_analytics(refresh.analytics);
        self.clone().run_list(refresh.list);
    }

    fn apply_filter(&self, field: FilterField, raw: &str, error: &UseStateHandle<Option<String>>) {
        let outcome = self.controller.borrow_mut().set_filter(field, raw);
        match outcome {
            Ok(request) => {
                error.set(None);
                self.clone().run_list(request);
            },
            Err(err) => error.set(Some(err.display_message())),
        }
    }
}

fn select_value(event: &Event) -> String {
    let target: HtmlSelectElement = event.target_unchecked_into();
    target.value()
}

#[function_component(AdminDashboardPage)]
pub fn admin_dashboard_page() -> Html {
    let gateway = use_memo((), |_| api::gateway());
    let controller = use_mut_ref(|| {
        AdminQueryController::new(&config::client_config(), gateway.session().clone())
    });
    let redraw = use_force_update();
    let expanded = use_state(HashSet::<String>::new);
    let search_draft = use_state(String::new);
    let filter_error = use_state(|| None::<String>);
    let navigator = use_navigator();

    let host = DashboardHost {
        controller: controller.clone(),
        gateway: (*gateway).clone(),
        redraw,
    };

    {
        let host = host.clone();
        use_effect_with((), move |_| {
            if host.gateway.session().is_authenticated() {
                host.refresh();
            }
            || ()
        });
    }

    if !gateway.session().is_authenticated() {
        return html! { <Redirect<Route> to={Route::AdminLogin} /> };
    }

    let on_rating = {
        let host = host.clone();
        let filter_error = filter_error.clone();
        Callback::from(move |e: Event| {
            host.apply_filter(FilterField::Rating, &select_value(&e), &filter_error)
        })
    };
    let on_status = {
        let host = host.clone();
        let filter_error = filter_error.clone();
        Callback::from(move |e: Event| {
            host.apply_filter(FilterField::Status, &select_value(&e), &filter_error)
        })
    };
    let on_search_submit = {
        let host = host.clone();
        let draft = search_draft.clone();
        let filter_error = filter_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            host.apply_filter(FilterField::Search, &draft, &filter_error);
        })
    };
    let on_search_input = {
        let draft = search_draft.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            draft.set(target.value());
        })
    };
    let on_clear = {
        let host = host.clone();
        let draft = search_draft.clone();
        let filter_error = filter_error.clone();
        Callback::from(move |_| {
            draft.set(String::new());
            filter_error.set(None);
            let request = host.controller.borrow_mut().clear_filters();
            host.clone().run_list(request);
        })
    };
    let on_refresh = {
        let host = host.clone();
        Callback::from(move |_: ()| host.refresh())
    };
    let on_page_change = {
        let host = host.clone();
        Callback::from(move |page: u64| {
            let request = host.controller.borrow_mut().set_page(page);
            host.clone().run_list(request);
        })
    };
    let on_logout = {
        let gateway = gateway.clone();
        Callback::from(move |_| {
            session::logout(gateway.session());
            if let Some(navigator) = navigator.as_ref() {
                navigator.push(&Route::AdminLogin);
            }
        })
    };
    let on_toggle = {
        let expanded = expanded.clone();
        Callback::from(move |id: String| {
            let mut next = (*expanded).clone();
            if !next.remove(&id) {
                next.insert(id);
            }
            expanded.set(next);
        })
    };
    let on_filter_error_close = {
        let filter_error = filter_error.clone();
        Callback::from(move |_| filter_error.set(None))
    };

    let controller = controller.borrow();
    let filters = controller.filters();
    let rating_value = filters.value_of(FilterField::Rating);
    let status_value = filters.value_of(FilterField::Status);
    let list_state = controller.list_state();
    let analytics_state = controller.analytics_state();

    let analytics = if let Some(snapshot) = analytics_state.ready() {
        html! { <AnalyticsPanel view={AnalyticsView::from(snapshot)} /> }
    } else if let Some(err) = analytics_state.error() {
        html! { <ErrorBanner message={err.display_message()} on_retry={on_refresh.clone()} /> }
    } else {
        html! { <LoadingSpinner label="Loading analytics..." /> }
    };

    let listing = if let Some(err) = list_state.error() {
        html! { <ErrorBanner message={err.display_message()} on_retry={on_refresh.clone()} /> }
    } else if let Some(page) = list_state.ready() {
        if page.items.is_empty() {
            html! { <p class="py-8 text-center text-[var(--muted)]">{"No submissions match these filters."}</p> }
        } else {
            html! {
                <table class="w-full text-left text-sm">
                    <thead class="text-xs uppercase text-[var(--muted)]">
                        <tr>
                            <th class="py-2">{"ID"}</th>
                            <th>{"Rating"}</th>
                            <th>{"Review"}</th>
                            <th>{"Status"}</th>
                            <th>{"Created"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.items.iter().map(|item| submission_row(item, expanded.contains(&item.id), on_toggle.clone())) }
                    </tbody>
                </table>
            }
        }
    } else {
        html! { <LoadingSpinner label="Loading submissions..." /> }
    };

    let select_class = "rounded-lg border border-[var(--border)] bg-transparent px-3 py-2 text-sm";

    html! {
        <div class="mx-auto max-w-6xl space-y-8 px-6 py-10">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Review dashboard"}</h1>
                <div class="flex gap-2">
                    <button type="button" class={select_class} onclick={on_refresh.reform(|_: MouseEvent| ())}>{"Refresh"}</button>
                    <button type="button" class={select_class} onclick={on_logout}>{"Log out"}</button>
                </div>
            </div>

            { analytics }

            if let Some(message) = (*filter_error).clone() {
                <ErrorBanner message={message} on_close={on_filter_error_close} auto_dismiss={true} />
            }

            <div class="flex flex-wrap items-center gap-3">
                <select class={select_class} onchange={on_rating} aria-label="Filter by rating">
                    <option value="" selected={rating_value.is_empty()}>{"All ratings"}</option>
                    { for (Rating::MIN..=Rating::MAX).map(|value| html! {
                        <option value={value.to_string()} selected={rating_value == value.to_string()}>
                            { format!("{value} stars") }
                        </option>
                    }) }
                </select>
                <select class={select_class} onchange={on_status} aria-label="Filter by status">
                    <option value="" selected={status_value.is_empty()}>{"All statuses"}</option>
                    { for Status::ALL.into_iter().map(|status| html! {
                        <option value={status.as_str()} selected={status_value == status.as_str()}>
                            { status.label() }
                        </option>
                    }) }
                </select>
                <form class="flex gap-2" onsubmit={on_search_submit}>
                    <input
                        name="q"
                        type="search"
                        class={select_class}
                        placeholder="Search reviews"
                        value={(*search_draft).clone()}
                        oninput={on_search_input}
                    />
                    <button type="submit" class={select_class}>{"Search"}</button>
                </form>
                if !filters.is_empty() {
                    <button type="button" class={select_class} onclick={on_clear}>{"Clear filters"}</button>
                }
            </div>

            { listing }

            <Pagination view={controller.pagination()} on_page_change={on_page_change} />
        </div>
    }
}

fn submission_row(item: &AdminSubmissionSummary, open: bool, on_toggle: Callback<String>) -> Html {
    let onclick = {
        let id = item.id.clone();
        Callback::from(move |_| on_toggle.emit(id.clone()))
    };

    html! {
        <>
            <tr class="cursor-pointer border-t border-[var(--border)] hover:bg-[var(--surface-alt)]" {onclick}>
                <td class="py-2 font-mono" title={item.id.clone()}>{ item.short_id() }</td>
                <td>{ ("★").repeat(usize::from(item.rating.get())) }</td>
                <td class="max-w-md truncate">{ item.review_text.clone() }</td>
                <td><StatusBadge status={item.status} /></td>
                <td>{ item.created_at.format("%Y-%m-%d %H:%M").to_string() }</td>
            </tr>
            if open {
                <tr class="bg-[var(--surface-alt)]">
                    <td colspan="5" class="space-y-3 p-4">
                        <p class="whitespace-pre-wrap">{ item.review_text.clone() }</p>
                        if let Some(summary) = item.admin_summary.clone() {
                            <div>
                                <h4 class="text-xs font-semibold uppercase text-[var(--muted)]">{"Summary"}</h4>
                                <p>{ summary }</p>
                            </div>
                        }
                        if !item.recommended_actions.is_empty() {
                            <div>
                                <h4 class="text-xs font-semibold uppercase text-[var(--muted)]">{"Recommended actions"}</h4>
                                <ul class="list-disc pl-5">
                                    { for item.recommended_actions.iter().map(|action| html! { <li>{ action.clone() }</li> }) }
                                </ul>
                            </div>
                        }
                        if let Some(error) = item.error_message.clone() {
                            <p class="text-red-600">{ error }</p>
                        }
                    </td>
                </tr>
            }
        </>
    }
}
