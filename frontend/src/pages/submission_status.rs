use std::{cell::RefCell, rc::Rc};

use gloo_timers::future::TimeoutFuture;
use reviewflow_shared::{
    poller::{PollEffect, PollState, SubmissionPoller},
    Submission,
};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api::{self, Gateway},
    components::{
        error_banner::ErrorBanner, loading_spinner::LoadingSpinner, status_badge::StatusBadge,
    },
    config,
    router::Route,
};

#[derive(Properties, PartialEq)]
pub struct SubmissionStatusProps {
    pub id: String,
}

/// Everything an in-flight effect needs once it resolves.
#[derive(Clone)]
struct PollHost {
    poller: Rc<RefCell<SubmissionPoller>>,
    gateway: Rc<Gateway>,
    state: UseStateHandle<PollState>,
}

impl PollHost {
    fn publish(&self) {
        self.state.set(self.poller.borrow().state().clone());
    }

    fn perform(self, effect: PollEffect) {
        wasm_bindgen_futures::spawn_local(async move {
            let next = match effect {
                PollEffect::Fetch(ticket) => {
                    let result = self.gateway.fetch_submission_status(ticket.id()).await;
                    if let Err(err) = &result {
                        web_sys::console::error_1(&format!("Status fetch failed: {}", err).into());
                    }
                    let next = self.poller.borrow_mut().apply(&ticket, result);
                    self.publish();
                    next
                },
                PollEffect::Schedule {
                    ticket,
                    after,
                } => {
                    let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
                    TimeoutFuture::new(millis).await;
                    self.poller.borrow_mut().timer_fired(&ticket)
                },
            };
            if let Some(next) = next {
                self.perform(next);
            }
        });
    }
}

#[function_component(SubmissionStatusPage)]
pub fn submission_status_page(props: &SubmissionStatusProps) -> Html {
    let gateway = use_memo((), |_| api::gateway());
    let poller = use_mut_ref(|| SubmissionPoller::new(config::client_config().poll_interval));
    let state = use_state(|| PollState::Idle);

    let host = PollHost {
        poller: poller.clone(),
        gateway: (*gateway).clone(),
        state: state.clone(),
    };

    {
        let host = host.clone();
        use_effect_with(props.id.clone(), move |id| {
            let effect = host.poller.borrow_mut().watch(id);
            host.publish();
            if let Some(effect) = effect {
                host.clone().perform(effect);
            }
            let poller = host.poller.clone();
            move || poller.borrow_mut().dispose()
        });
    }

    let on_retry = Callback::from(move |_| {
        let effect = host.poller.borrow_mut().retry();
        host.publish();
        if let Some(effect) = effect {
            host.clone().perform(effect);
        }
    });

    let body = match &*state {
        PollState::Idle | PollState::Loading => {
            html! { <LoadingSpinner label="Loading submission..." /> }
        },
        PollState::Pending(submission) => html! {
            <>
                { submission_card(submission) }
                <LoadingSpinner label="Generating a response to your review..." />
            </>
        },
        PollState::Completed(submission) => html! {
            <>
                { submission_card(submission) }
                <div class="rounded-xl border border-emerald-500/30 bg-emerald-500/10 p-4">
                    <h2 class="mb-2 font-semibold">{"Our response"}</h2>
                    <p class="whitespace-pre-wrap">
                        { submission.ai_response.clone().unwrap_or_default() }
                    </p>
                </div>
            </>
        },
        PollState::Failed(submission) => html! {
            <>
                { submission_card(submission) }
                <div class="rounded-xl border border-red-500/30 bg-red-500/10 p-4">
                    <p>
                        { submission
                            .error_message
                            .clone()
                            .unwrap_or_else(|| "We could not process your review.".to_string()) }
                    </p>
                </div>
            </>
        },
        PollState::Errored(err) => html! {
            <ErrorBanner message={err.display_message()} on_retry={on_retry} />
        },
    };

    html! {
        <div class="mx-auto max-w-2xl space-y-6 px-6 py-10">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Submission status"}</h1>
                <Link<Route> to={Route::Submit} classes={classes!("text-sm", "hover:text-[var(--primary)]")}>
                    {"Write another review"}
                </Link<Route>>
            </div>
            { body }
        </div>
    }
}

fn submission_card(submission: &Submission) -> Html {
    html! {
        <div class="space-y-2 rounded-xl border border-[var(--border)] p-4">
            <div class="flex items-center justify-between">
                <span class="text-amber-400">{ ("★").repeat(usize::from(submission.rating.get())) }</span>
                <StatusBadge status={submission.status} />
            </div>
            <p class="whitespace-pre-wrap">{ submission.review_text.clone() }</p>
            <p class="text-xs text-[var(--muted)]">
                { submission.created_at.format("%Y-%m-%d %H:%M UTC").to_string() }
            </p>
        </div>
    }
}
