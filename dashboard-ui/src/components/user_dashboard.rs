use crate::app::{badge_class, icon_glyph};
use crate::bridge;
use analysis_core::display::{AnalysisView, BadgeVariant, TagIcon};
use analysis_core::upload::is_image_mime;
use leptos::html::Input;
use leptos::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement, Url};

pub const INVALID_FILE_ALERT: &str = "Please upload an image file (jpg or png)";

#[component]
pub fn UserDashboard() -> impl IntoView {
    let file = create_rw_signal(None::<File>);
    let preview = create_rw_signal(None::<String>);
    let dragging = create_rw_signal(false);
    let analyzing = create_rw_signal(false);
    let result = create_rw_signal(None::<AnalysisView>);
    let error = create_rw_signal(None::<String>);
    let input_ref = create_node_ref::<Input>();

    let clear_preview = move || {
        if let Some(url) = preview.get_untracked() {
            let _ = Url::revoke_object_url(&url);
        }
        preview.set(None);
    };

    let handle_file = move |picked: File| {
        if !is_image_mime(&picked.type_()) {
            let _ = window().alert_with_message(INVALID_FILE_ALERT);
            return;
        }
        clear_preview();
        preview.set(Url::create_object_url_with_blob(&picked).ok());
        file.set(Some(picked));
        result.set(None);
        error.set(None);
    };

    let analyze = move || {
        let Some(picked) = file.get_untracked() else {
            return;
        };
        analyzing.set(true);
        error.set(None);
        spawn_local(async move {
            match bridge::analyze_image(&picked).await {
                Ok(r) => result.set(Some(r)),
                Err(e) => {
                    logging::error!("analysis failed: {e}");
                    error.set(Some(bridge::GENERIC_ERROR.to_string()));
                }
            }
            analyzing.set(false);
        });
    };

    let reset = move || {
        clear_preview();
        file.set(None);
        result.set(None);
        error.set(None);
        if let Some(input) = input_ref.get_untracked() {
            input.set_value("");
        }
    };

    let result_panel = move || {
        if analyzing.get() {
            view! {
              <section class="card">
                <h3>"Analyzing Incident"</h3>
                <p class="meta">"Our AI is examining the incident details, severity, and potential hazards"</p>
              </section>
            }
            .into_view()
        } else if let Some(analysis) = result.get() {
            let r = &analysis.result;
            let tags = r
                .tags
                .iter()
                .enumerate()
                .map(|(i, tag)| {
                    let icon = analysis.tag_icons.get(i).copied().unwrap_or(TagIcon::Alert);
                    view! { <span class="badge secondary">{icon_glyph(icon)} " " {tag.clone()}</span> }
                })
                .collect_view();
            let recs = r
                .recommendations
                .iter()
                .map(|rec| view! { <li>{rec.clone()}</li> })
                .collect_view();
            view! {
              <section class="card">
                <div class="row">
                  <h3>"Analysis Results"</h3>
                  <span class=badge_class(BadgeVariant::Outline)>{analysis.time_display.clone()}</span>
                </div>
                <p class="meta">"AI-generated insights for the uploaded incident"</p>
                <h4>"Summary"</h4>
                <p>{r.summary.clone()}</p>
                <h4>"Detailed Analysis"</h4>
                <p>{r.details.clone()}</p>
                <div class="row">
                  <div><span class="meta">"Severity "</span><b>{r.severity.clone()}</b></div>
                  <div><span class="meta">"Confidence "</span><b>{format!("{}%", r.confidence)}</b></div>
                </div>
                <h4>"Tags"</h4>
                <div>{tags}</div>
                <h4>"Recommendations"</h4>
                <ul>{recs}</ul>
                <button class="outline" on:click=move |_| reset()>"Upload Another Image"</button>
              </section>
            }
            .into_view()
        } else {
            view! {
              <section class="card">
                <h3>"No Analysis Yet"</h3>
                <p class="meta">"Upload an incident photo and click \"Analyze Image\" to receive AI-powered insights"</p>
              </section>
            }
            .into_view()
        }
    };

    view! {
      <div class="page">
        <div class="row">
          <h1>"Incident Analysis"</h1>
          <a href="/">"Back to Home"</a>
        </div>
        <p class="meta">"Upload an incident photo to generate AI-powered analysis and insights"</p>

        <div class="grid">
          <section class="card">
            <h3>"Upload Incident Photo"</h3>
            <p class="meta">"Drag and drop or select an incident photo (.jpg, .png)"</p>
            <div
              class="drop-area"
              class:active=move || dragging.get()
              on:dragover=move |ev: ev::DragEvent| {
                  ev.prevent_default();
                  dragging.set(true);
              }
              on:dragleave=move |ev: ev::DragEvent| {
                  ev.prevent_default();
                  dragging.set(false);
              }
              on:drop=move |ev: ev::DragEvent| {
                  ev.prevent_default();
                  dragging.set(false);
                  if let Some(f) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|l| l.get(0)) {
                      handle_file(f);
                  }
              }
              on:click=move |_| {
                  if let Some(input) = input_ref.get_untracked() {
                      input.click();
                  }
              }
            >
              {move || match preview.get() {
                  Some(src) => view! { <img src=src alt="Preview"/> }.into_view(),
                  None => view! {
                    <p class="meta">"Drag and drop your incident photo here or click to browse (JPG, PNG)"</p>
                  }
                  .into_view(),
              }}
              <input
                type="file"
                accept=".jpg,.jpeg,.png"
                style="display: none"
                node_ref=input_ref
                on:change=move |ev| {
                    let input = event_target::<HtmlInputElement>(&ev);
                    if let Some(f) = input.files().and_then(|l| l.get(0)) {
                        handle_file(f);
                    }
                }
              />
            </div>

            <Show when=move || file.with(Option::is_some) fallback=|| ()>
              <p class="meta">{move || format!("Selected file: {}", file.with(|f| f.as_ref().map(File::name).unwrap_or_default()))}</p>
            </Show>

            <div class="row">
              <button
                disabled=move || file.with(Option::is_none) || analyzing.get()
                on:click=move |_| analyze()
              >
                {move || if analyzing.get() { "Analyzing..." } else { "Analyze Image" }}
              </button>
              <Show when=move || file.with(Option::is_some) fallback=|| ()>
                <button class="outline" disabled=move || analyzing.get() on:click=move |_| reset()>"Reset"</button>
              </Show>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ()>
              <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
          </section>

          {result_panel}
        </div>
      </div>
    }
}
