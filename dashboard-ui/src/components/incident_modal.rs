use crate::app::badge_class;
use analysis_core::history::IncidentDetail;
use leptos::*;

#[component]
pub fn IncidentModal(selected: RwSignal<Option<IncidentDetail>>) -> impl IntoView {
    let close = move || selected.set(None);

    move || {
        selected.get().map(|detail| {
            let incident = &detail.record;
            let tags = incident
                .details
                .tags
                .iter()
                .map(|t| view! { <span class="badge secondary">{t.clone()}</span> })
                .collect_view();
            let recs = incident
                .details
                .recommendations
                .iter()
                .map(|r| view! { <li>{format!("\u{2022} {r}")}</li> })
                .collect_view();

            view! {
              <div class="modal-backdrop" on:click=move |_| close()>
                <div class="card modal" on:click=|ev| ev.stop_propagation()>
                  <div class="row">
                    <h2>{format!("Incident Details: {}", incident.id)}</h2>
                    <button class="outline" on:click=move |_| close()>"Close"</button>
                  </div>
                  <p class="meta">"Full analysis report for this incident"</p>
                  <div class="grid">
                    <div>
                      <img src=incident.thumbnail.clone() alt=format!("Incident {}", incident.id) width="100%"/>
                      <h4 class="meta">"ID"</h4>
                      <p>{incident.id.clone()}</p>
                      <h4 class="meta">"User"</h4>
                      <p>{incident.user_id.clone()}</p>
                      <h4 class="meta">"Date"</h4>
                      <p>{detail.date_display.clone()}</p>
                      <h4 class="meta">"Type"</h4>
                      <p>{incident.incident_type.clone()}</p>
                      <h4 class="meta">"Severity"</h4>
                      <span class=badge_class(detail.badge)>{incident.severity.clone()}</span>
                    </div>
                    <div>
                      <h3>"Analysis Summary"</h3>
                      <p>{incident.details.summary.clone()}</p>
                      <h3>"Detailed Analysis"</h3>
                      <p>{incident.details.details.clone()}</p>
                      <h4>"Technical Data"</h4>
                      <div class="row">
                        <div><span class="meta">"Severity "</span><b>{incident.details.severity.clone()}</b></div>
                        <div><span class="meta">"Confidence "</span><b>{format!("{}%", incident.details.confidence)}</b></div>
                        <div><span class="meta">"Analysis Time "</span><b>{detail.analysis_time_display.clone()}</b></div>
                      </div>
                      <h4>"Tags"</h4>
                      <div>{tags}</div>
                      <h4>"Recommendations"</h4>
                      <ul>{recs}</ul>
                    </div>
                  </div>
                </div>
              </div>
            }
        })
    }
}
