use crate::app::badge_class;
use crate::bridge;
use crate::components::incident_modal::IncidentModal;
use analysis_core::history::{self, IncidentDetail, IncidentQuery};
use incident_registry::IncidentRecord;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

const SEVERITY_OPTIONS: &[(&str, &str)] = &[
    (history::ALL_SEVERITIES, "All Severities"),
    ("Low", "Low"),
    ("Medium", "Medium"),
    ("Moderate", "Moderate"),
    ("High", "High"),
    ("Critical", "Critical"),
];

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let records = create_rw_signal(Vec::<IncidentRecord>::new());
    let search = create_rw_signal(String::new());
    let severity = create_rw_signal(String::new());
    let page = create_rw_signal(1_usize);
    let selected = create_rw_signal(None::<IncidentDetail>);
    let error = create_rw_signal(None::<String>);

    spawn_local(async move {
        match bridge::fetch_history().await {
            Ok(list) => records.set(list),
            Err(e) => error.set(Some(format!("Failed to load incident history: {e}"))),
        }
    });

    let listing = create_memo(move |_| {
        let query = IncidentQuery {
            search: search.get(),
            severity: Some(severity.get()),
            page: page.get(),
        };
        records.with(|all| history::query_history(all, &query))
    });

    let open = move |id: String| {
        let detail = records
            .with_untracked(|all| history::find_incident(all, &id).map(IncidentDetail::from));
        match detail {
            Some(detail) => selected.set(Some(detail)),
            None => error.set(Some(format!("Incident {id} not found"))),
        }
    };

    view! {
      <div class="page">
        <div class="row">
          <h1>"Admin Panel \u{2013} Incident History"</h1>
          <a href="/">"Back to Home"</a>
        </div>
        <p class="meta">"View and manage all incident analyses"</p>

        <section class="card">
          <h3>"Search and Filter"</h3>
          <p class="meta">"Find specific incidents by ID, user, type, or description"</p>
          <div class="row">
            <input
              placeholder="Search incidents..."
              prop:value=move || search.get()
              on:input=move |ev| {
                  search.set(event_target_value(&ev));
                  page.set(1);
              }
            />
            <select on:change=move |ev| {
                severity.set(event_target_value(&ev));
                page.set(1);
            }>
              <option value="" disabled=true selected=true>"Severity"</option>
              {SEVERITY_OPTIONS
                  .iter()
                  .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                  .collect_view()}
            </select>
          </div>
        </section>

        <section class="card">
          <h3>"Incident History"</h3>
          <p class="meta">{move || format!("{} incidents found", listing.with(|p| p.total))}</p>
          <table>
            <thead>
              <tr>
                <th>"Image"</th>
                <th>"ID"</th>
                <th>"User"</th>
                <th>"Date"</th>
                <th>"Type"</th>
                <th>"Severity"</th>
                <th>"Summary"</th>
                <th>"Actions"</th>
              </tr>
            </thead>
            <tbody>
              <Show
                when=move || listing.with(|p| !p.items.is_empty())
                fallback=|| view! { <tr><td colspan="8">"No incidents found."</td></tr> }
              >
                <For
                  each=move || listing.get().items
                  key=|row| row.id.clone()
                  children=move |row| {
                      let id = row.id.clone();
                      view! {
                        <tr>
                          <td><img src=row.thumbnail.clone() alt=format!("Incident {}", row.id) width="80"/></td>
                          <td><b>{row.id.clone()}</b></td>
                          <td>{row.user_id.clone()}</td>
                          <td>{row.date_display.clone()}</td>
                          <td>{row.incident_type.clone()}</td>
                          <td><span class=badge_class(row.badge)>{row.severity.clone()}</span></td>
                          <td class="summary">{row.summary.clone()}</td>
                          <td><button class="outline" on:click=move |_| open(id.clone())>"View"</button></td>
                        </tr>
                      }
                  }
                />
              </Show>
            </tbody>
          </table>

          <Show when=move || listing.with(|p| p.total_pages > 1) fallback=|| ()>
            <div class="row">
              <button
                class="outline"
                disabled=move || listing.with(|p| p.page <= 1)
                on:click=move |_| {
                    let current = listing.with_untracked(|p| p.page);
                    page.set(current.saturating_sub(1).max(1));
                }
              >
                "Previous"
              </button>
              <span class="meta">
                {move || listing.with(|p| format!("Page {} of {}", p.page, p.total_pages))}
              </span>
              <button
                class="outline"
                disabled=move || listing.with(|p| p.page >= p.total_pages)
                on:click=move |_| {
                    let (current, last) = listing.with_untracked(|p| (p.page, p.total_pages));
                    page.set((current + 1).min(last));
                }
              >
                "Next"
              </button>
            </div>
          </Show>

          <Show when=move || error.get().is_some() fallback=|| ()>
            <pre class="error">{move || error.get().unwrap_or_default()}</pre>
          </Show>
        </section>

        <IncidentModal selected=selected/>
      </div>
    }
}
