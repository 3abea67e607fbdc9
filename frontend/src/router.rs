use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    components::guard::RequireAuth,
    pages::{DashboardPage, LoginPage, SignupPage},
    state::session::SessionProvider,
    utils::navigation::{DASHBOARD_PATH, LOGIN_PATH},
};

pub const SIGNUP_PATH: &str = "/signup";

pub const ROUTE_PATHS: &[&str] = &["/", LOGIN_PATH, SIGNUP_PATH, DASHBOARD_PATH];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[DASHBOARD_PATH];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &[LOGIN_PATH, SIGNUP_PATH];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="AgriView" />
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path="/" view=RootRedirect />
                    <Route path=LOGIN_PATH view=LoginPage />
                    <Route path=SIGNUP_PATH view=SignupPage />
                    <Route path=DASHBOARD_PATH view=ProtectedDashboard />
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[component]
fn RootRedirect() -> impl IntoView {
    view! { <Redirect path=DASHBOARD_PATH /> }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage /></RequireAuth> }
}
