use crate::{
    components::layout::{Header, Sidebar},
    pages::{farms::FarmsPanel, ndvi::NdviPanel, profile::ProfilePanel},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Farms,
    Ndvi,
    Profile,
}

impl DashboardView {
    pub const ALL: [DashboardView; 3] = [DashboardView::Farms, DashboardView::Ndvi, DashboardView::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardView::Farms => "Farms",
            DashboardView::Ndvi => "NDVI",
            DashboardView::Profile => "Profile",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardView::Farms => "My Farms",
            DashboardView::Ndvi => "NDVI Analysis",
            DashboardView::Profile => "My Profile",
        }
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let current = create_rw_signal(DashboardView::default());

    view! {
        <div class="dashboard">
            <Header />
            <div class="dashboard-body">
                <Sidebar current=current />
                <main class="dashboard-main">
                    <div class="page-header">
                        <h2>{move || current.get().title()}</h2>
                    </div>
                    <div class="page-content">
                        {move || match current.get() {
                            DashboardView::Farms => view! { <FarmsPanel /> }.into_view(),
                            DashboardView::Ndvi => view! { <NdviPanel /> }.into_view(),
                            DashboardView::Profile => view! { <ProfilePanel /> }.into_view(),
                        }}
                    </div>
                </main>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_defaults_to_farms() {
        assert_eq!(DashboardView::default(), DashboardView::Farms);
        assert_eq!(DashboardView::Ndvi.title(), "NDVI Analysis");
        assert_eq!(DashboardView::Profile.label(), "Profile");
    }
}
