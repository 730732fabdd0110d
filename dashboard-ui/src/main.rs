mod app;
mod bridge;

pub mod components {
    pub mod admin_dashboard;
    pub mod incident_modal;
    pub mod landing;
    pub mod user_dashboard;
}

fn main() {
    leptos::mount_to_body(app::App);
}
