use leptos::*;

use crate::components::layout::AuthLayout;

pub mod repository;
pub mod utils;

mod panel;

pub use panel::SignupPanel;

#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <AuthLayout>
            <SignupPanel />
        </AuthLayout>
    }
}
