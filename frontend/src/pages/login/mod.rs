use leptos::*;

use crate::components::layout::AuthLayout;

pub mod utils;

mod panel;

pub use panel::LoginPanel;

/// Email and password sign-in; a successful login lands on the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <AuthLayout>
            <LoginPanel />
        </AuthLayout>
    }
}
