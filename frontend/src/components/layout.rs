use crate::{
    pages::dashboard::DashboardView,
    state::session::use_session,
    utils::navigation::{navigate_to, LOGIN_PATH},
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let store = use_session();
    let session = store.read_only();
    let (menu_open, set_menu_open) = create_signal(false);

    let display_name = move || {
        session
            .get()
            .map(|s| s.display_name())
            .unwrap_or_default()
    };
    let account_label = move || {
        session
            .get()
            .and_then(|s| s.username.clone().or(s.email.clone()))
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        set_menu_open.set(false);
        store.logout();
        navigate_to(LOGIN_PATH);
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="header">
            <div class="header-brand">
                <h1 class="header-title">"AgriView"</h1>
                <p class="header-subtitle">"Farm Insights & NDVI Monitoring"</p>
            </div>
            <p class="header-greeting">
                <strong>"Welcome back, "</strong>
                {display_name}
            </p>
            <div class="header-account">
                <button type="button" class="header-account-toggle" on:click=toggle_menu>
                    {account_label}
                </button>
                <Show when=move || menu_open.get() fallback=|| ()>
                    <div class="header-menu">
                        <button type="button" on:click=on_logout.clone()>"Logout"</button>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Sidebar(current: RwSignal<DashboardView>) -> impl IntoView {
    let item = move |view: DashboardView| {
        let class = move || {
            if current.get() == view {
                "sidebar-item active"
            } else {
                "sidebar-item"
            }
        };
        view! {
            <button type="button" class=class on:click=move |_| current.set(view)>
                {view.label()}
            </button>
        }
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-title">"Navigation"</div>
            {DashboardView::ALL.into_iter().map(item).collect_view()}
        </aside>
    }
}

/// Branded frame around the sign-in and sign-up forms.
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <main class="auth-page">
            <div class="auth-brand">
                <h1 class="auth-brand-title">"AgriView"</h1>
                <p class="auth-brand-subtitle">"Farm Insights & NDVI Monitoring"</p>
            </div>
            {children()}
        </main>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="loading" role="status">
            <div class="spinner"></div>
            <span>{label.unwrap_or_else(|| "Loading...".to_string())}</span>
        </div>
    }
}
