use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages;

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Submit,

    #[at("/status/:id")]
    Status { id: String },

    #[at("/admin/login")]
    AdminLogin,

    #[at("/admin/dashboard")]
    AdminDashboard,

    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Submit => html! { <pages::submit::SubmitPage /> },
        Route::Status {
            id,
        } => {
            html! { <pages::submission_status::SubmissionStatusPage id={id} /> }
        },
        Route::AdminLogin => html! { <pages::admin_login::AdminLoginPage /> },
        Route::AdminDashboard => html! { <pages::admin_dashboard::AdminDashboardPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Submit} /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex flex-col bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                <header class="flex items-center justify-between px-6 py-4 border-b border-[var(--border)]">
                    <Link<Route> to={Route::Submit} classes={classes!("text-lg", "font-bold", "text-[var(--text)]")}>
                        {"ReviewFlow"}
                    </Link<Route>>
                    <Link<Route> to={Route::AdminDashboard} classes={classes!("text-sm", "text-[var(--muted)]", "hover:text-[var(--primary)]")}>
                        {"Admin"}
                    </Link<Route>>
                </header>
                <main class="flex-1 pt-[var(--space-sm)]">
                    <Switch<Route> render={switch} />
                </main>
            </div>
        </BrowserRouter>
    }
}
