use reviewflow_shared::model::Rating;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{api, components::error_banner::ErrorBanner, router::Route};

#[function_component(SubmitPage)]
pub fn submit_page() -> Html {
    let gateway = use_memo((), |_| api::gateway());
    let navigator = use_navigator();
    let rating = use_state(|| 0_u8);
    let review = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_review_input = {
        let review = review.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlTextAreaElement = e.target_unchecked_into();
            review.set(target.value());
        })
    };

    let on_submit = {
        let gateway = gateway.clone();
        let rating = rating.clone();
        let review = review.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let gateway = (*gateway).clone();
            let rating = *rating;
            let text = (*review).clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match gateway.submit_review(rating, &text).await {
                    Ok(receipt) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Status {
                                id: receipt.submission_id,
                            });
                        }
                    },
                    Err(err) => {
                        web_sys::console::error_1(&format!("Submit failed: {}", err).into());
                        error.set(Some(err.display_message()));
                    },
                }
                submitting.set(false);
            });
        })
    };

    let stars = (Rating::MIN..=Rating::MAX).map(|value| {
        let selected = value <= *rating;
        let onclick = {
            let rating = rating.clone();
            Callback::from(move |_| rating.set(value))
        };
        html! {
            <button
                key={value}
                type="button"
                class={classes!("text-3xl", "transition", if selected { "text-amber-400" } else { "text-[var(--muted)]" })}
                aria-label={format!("{value} star")}
                aria-pressed={selected.to_string()}
                {onclick}
            >
                {"★"}
            </button>
        }
    });

    let on_error_close = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    html! {
        <div class="mx-auto max-w-2xl space-y-6 px-6 py-10">
            <h1 class="text-2xl font-bold">{"Share your experience"}</h1>
            if let Some(message) = (*error).clone() {
                <ErrorBanner message={message} on_close={on_error_close} />
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="flex gap-1" role="radiogroup" aria-label="Rating">
                    { for stars }
                </div>
                <textarea
                    class="w-full min-h-[8rem] rounded-xl border border-[var(--border)] bg-transparent p-3"
                    placeholder="Tell us what went well or what did not"
                    value={(*review).clone()}
                    oninput={on_review_input}
                />
                <button
                    type="submit"
                    class="rounded-lg bg-[var(--primary)] px-5 py-2 font-semibold text-white disabled:opacity-50"
                    disabled={*submitting}
                >
                    { if *submitting { "Submitting..." } else { "Submit review" } }
                </button>
            </form>
        </div>
    }
}
