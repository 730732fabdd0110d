use analysis_core::roles::Role;
use leptos::*;

#[component]
pub fn Landing() -> impl IntoView {
    let selected = create_rw_signal(None::<Role>);

    let choose = move |role: Role| {
        selected.set(Some(role));
        if let Err(e) = window().location().set_href(role.path()) {
            logging::error!("navigation to {} failed: {e:?}", role.path());
        }
    };

    let card_class = move |role: Role| {
        if selected.get() == Some(role) {
            "card selected"
        } else {
            "card"
        }
    };

    view! {
      <div class="page">
        <h1>"Incident Analysis Dashboard"</h1>
        <p class="meta">"AI-powered incident analysis for emergency responders and administrators"</p>
        <div class="grid">
          <section class=move || card_class(Role::User)>
            <h2>"User Dashboard"</h2>
            <p class="meta">"Upload and analyze incident photos"</p>
            <ul>
              <li>"Incident type and severity assessment"</li>
              <li>"Detailed scene analysis"</li>
              <li>"Recommended response actions"</li>
            </ul>
            <button on:click=move |_| choose(Role::User)>"Continue as User"</button>
          </section>
          <section class=move || card_class(Role::Admin)>
            <h2>"Admin Dashboard"</h2>
            <p class="meta">"Manage and review incident history"</p>
            <ul>
              <li>"View all uploaded incidents"</li>
              <li>"Search and filter by various criteria"</li>
              <li>"Access detailed analysis reports"</li>
            </ul>
            <button class="outline" on:click=move |_| choose(Role::Admin)>"Continue as Admin"</button>
          </section>
        </div>
      </div>
    }
}
