use reviewflow_shared::session;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{api, components::error_banner::ErrorBanner, router::Route};

#[function_component(AdminLoginPage)]
pub fn admin_login_page() -> Html {
    let gateway = use_memo((), |_| api::gateway());
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);

    if gateway.session().is_authenticated() {
        return html! { <Redirect<Route> to={Route::AdminDashboard} /> };
    }

    let bind = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            handle.set(target.value());
        })
    };
    let on_username = bind(&username);
    let on_password = bind(&password);

    let on_submit = {
        let gateway = gateway.clone();
        let username = username.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let gateway = (*gateway).clone();
            let username = (*username).clone();
            let password = (*password).clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let navigator = navigator.clone();
            submitting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match session::login(&gateway, &username, &password).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::AdminDashboard);
                        }
                    },
                    Err(err) => error.set(Some(err.display_message())),
                }
                submitting.set(false);
            });
        })
    };

    let on_error_close = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    html! {
        <div class="mx-auto max-w-sm space-y-6 px-6 py-16">
            <h1 class="text-2xl font-bold">{"Admin sign in"}</h1>
            if let Some(message) = (*error).clone() {
                <ErrorBanner message={message} on_close={on_error_close} />
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <input
                    type="text"
                    class="w-full rounded-lg border border-[var(--border)] bg-transparent px-3 py-2"
                    placeholder="Username"
                    autocomplete="username"
                    value={(*username).clone()}
                    oninput={on_username}
                />
                <input
                    type="password"
                    class="w-full rounded-lg border border-[var(--border)] bg-transparent px-3 py-2"
                    placeholder="Password"
                    autocomplete="current-password"
                    value={(*password).clone()}
                    oninput={on_password}
                />
                <button
                    type="submit"
                    class="w-full rounded-lg bg-[var(--primary)] px-5 py-2 font-semibold text-white disabled:opacity-50"
                    disabled={*submitting}
                >
                    { if *submitting { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
        </div>
    }
}
