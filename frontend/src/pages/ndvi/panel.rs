use leptos::*;

use super::{
    utils::{
        format_stat, outline_points, today, trend_points, LatLngBounds, DATE_FORMAT, MAP_HEIGHT,
        MAP_WIDTH, TREND_HEIGHT, TREND_WIDTH,
    },
    view_model::NdviViewModel,
};
use crate::{
    api::{ApiError, NdviHistoryEntry, NdviResult},
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
};

const OVERLAY_OPACITY: &str = "0.6";

#[component]
pub fn NdviPanel() -> impl IntoView {
    let vm = NdviViewModel::new();
    let max_date = today().format(DATE_FORMAT).to_string();
    let loading = vm.fetch_action.pending();

    view! {
        <section class="ndvi-panel">
            <div class="ndvi-inputs">
                <label class="input-group">
                    "Select Farm:"
                    <select
                        prop:value=move || vm.selected_farm.get().unwrap_or_default()
                        on:change=move |ev| vm.select_farm(event_target_value(&ev))
                    >
                        <option value="">"-- Choose a farm --"</option>
                        <For
                            each=move || vm.farms.get()
                            key=|farm| farm.id.clone()
                            children=move |farm| view! {
                                <option value=farm.id.clone()>{farm.name.clone()}</option>
                            }
                        />
                    </select>
                </label>
                <label class="input-group">
                    "Select Date:"
                    <input
                        type="date"
                        max=max_date
                        disabled=move || vm.selected_farm.get().is_none()
                        prop:value=move || vm.selected_date.get()
                        on:change=move |ev| vm.select_date(event_target_value(&ev), today())
                    />
                </label>
            </div>
            {move || vm.date_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
            <Show when=move || loading.get()>
                <LoadingSpinner label="Loading NDVI data..." />
            </Show>
            <InlineErrorMessage error=vm.error />
            {move || vm.result.get().map(|result| {
                let fallback_date = vm.selected_date.get_untracked();
                view! {
                    <NdviStatsCard result=result.clone() fallback_date=fallback_date />
                    <NdviMap outline=vm.outline() image=result.image />
                }
            })}
            {move || vm.history_resource.get().map(|history| view! { <NdviHistorySection history=history /> })}
        </section>
    }
}

#[component]
fn NdviStatsCard(result: NdviResult, fallback_date: String) -> impl IntoView {
    let date = result.date.clone().unwrap_or(fallback_date);
    let stats = result.stats;

    view! {
        <div class="ndvi-card">
            <p class="ndvi-value">
                "NDVI on " {date} ": " <strong>{format_stat(stats.mean)}</strong>
            </p>
            <p>"Standard Deviation: " {format_stat(stats.stddev)}</p>
            <p>"Min: " {format_stat(stats.min)}</p>
            <p>"Max: " {format_stat(stats.max)}</p>
        </div>
    }
}

/// Farm outline drawn over the NDVI raster, both fitted to the outline's bounds.
#[component]
fn NdviMap(outline: Vec<[f64; 2]>, image: Option<String>) -> impl IntoView {
    let bounds = LatLngBounds::from_points(&outline);
    let points = outline_points(&outline, &bounds);
    let view_box = format!("0 0 {} {}", MAP_WIDTH, MAP_HEIGHT);

    view! {
        <div class="ndvi-map">
            <svg viewBox=view_box preserveAspectRatio="xMidYMid meet" role="img" aria-label="Farm NDVI map">
                {image.map(|href| view! {
                    <image
                        href=href
                        x="0"
                        y="0"
                        width=MAP_WIDTH.to_string()
                        height=MAP_HEIGHT.to_string()
                        opacity=OVERLAY_OPACITY
                        preserveAspectRatio="none"
                    />
                })}
                <polygon points=points fill="none" stroke="green" stroke-width="2" />
            </svg>
        </div>
    }
}

/// Trend chart for the selected farm, or the error that kept it from loading.
#[component]
fn NdviHistorySection(history: Result<Vec<NdviHistoryEntry>, ApiError>) -> impl IntoView {
    match history {
        Ok(history) if history.is_empty() => ().into_view(),
        Ok(history) => view! { <NdviTrend history=history /> }.into_view(),
        Err(err) => {
            log::warn!("Failed to fetch NDVI history: {}", err);
            let error = Signal::derive(move || Some(err.clone()));
            view! {
                <div class="ndvi-trend">
                    <h4>"NDVI Trend"</h4>
                    <InlineErrorMessage error=error />
                </div>
            }
            .into_view()
        }
    }
}

#[component]
fn NdviTrend(history: Vec<NdviHistoryEntry>) -> impl IntoView {
    let points = trend_points(&history, TREND_WIDTH, TREND_HEIGHT);
    let view_box = format!("0 0 {} {}", TREND_WIDTH, TREND_HEIGHT);
    let first = history.first().map(|entry| entry.date.clone()).unwrap_or_default();
    let last = history.last().map(|entry| entry.date.clone()).unwrap_or_default();

    view! {
        <div class="ndvi-trend">
            <h4>"NDVI Trend"</h4>
            <svg viewBox=view_box preserveAspectRatio="none" role="img" aria-label="NDVI trend">
                <polyline points=points fill="none" stroke="green" stroke-width="2" />
            </svg>
            <div class="ndvi-trend-range">
                <span>{first}</span>
                <span>{last}</span>
            </div>
        </div>
    }
}
