use eframe::egui;
use egui_hostview::app::EguiHostview;
use egui_hostview::context::AppContext;
use egui_hostview::logic::{FetchCommand, SharedState};
use egui_hostview::model::{AppState, RefreshMode};
use egui_kittest::Harness;
use egui_kittest::kittest::Queryable;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// --- Helpers ---

fn empty_state() -> SharedState {
    Arc::new(Mutex::new(AppState::default()))
}

/// App wired to a plain channel instead of the background fetch task, so
/// tests can observe what the UI sends.
fn detached_app(state: SharedState) -> (EguiHostview, mpsc::Receiver<FetchCommand>) {
    let (tx, rx) = mpsc::channel(8);
    let app = EguiHostview::from_context(AppContext::detached(state, tx));
    (app, rx)
}

// --- Tests ---

#[test]
fn test_get_hosts_button_sends_one_command() {
    let state = empty_state();
    let (mut app, mut rx) = detached_app(state);

    let mut harness = Harness::new(|ctx| app.ui_layout(ctx));
    harness.get_by_label("Get hosts").click();
    harness.run();

    assert!(matches!(rx.try_recv(), Ok(FetchCommand::GetHosts)));
    assert!(
        rx.try_recv().is_err(),
        "one click must issue exactly one fetch"
    );
}

#[test]
fn test_fetched_hosts_render_through_bracket_template() {
    let state = empty_state();
    {
        let mut s = state.lock().unwrap();
        s.settings.row_template = "[[ hostname ]]".to_string();
        s.data = Some(json!({"hosts": ["sw01.lan", "rt02.lan"]}));
    }

    let (mut app, _rx) = detached_app(state);
    let mut harness = Harness::new(|ctx| app.ui_layout(ctx));
    harness.set_size(egui::vec2(1200.0, 800.0));
    harness.run();

    harness.get_by_label("sw01.lan");
    harness.get_by_label("rt02.lan");
}

#[test]
fn test_curly_expressions_from_the_server_stay_literal() {
    let state = empty_state();
    {
        let mut s = state.lock().unwrap();
        s.settings.row_template = "[[ hostname ]] {{ hostname }}".to_string();
        s.data = Some(json!({"hosts": ["sw01.lan"]}));
    }

    let (mut app, _rx) = detached_app(state);
    let mut harness = Harness::new(|ctx| app.ui_layout(ctx));
    harness.set_size(egui::vec2(1200.0, 800.0));
    harness.run();

    // Only the bracket expression binds; the curly one is plain text
    harness.get_by_label("sw01.lan {{ hostname }}");
}

#[test]
fn test_no_data_renders_no_rows() {
    let state = empty_state();
    let (mut app, _rx) = detached_app(state);

    let mut harness = Harness::new(|ctx| app.ui_layout(ctx));
    harness.set_size(egui::vec2(1200.0, 800.0));
    harness.run();

    harness.get_by_label_contains("no fetches yet");
    assert!(harness.query_by_label("sw01.lan").is_none());
}

#[test]
fn test_failed_fetch_keeps_previous_rows() {
    let state = empty_state();
    {
        let mut s = state.lock().unwrap();
        s.settings.row_template = "[[ hostname ]]".to_string();
        s.data = Some(json!({"hosts": ["sw01.lan"]}));
        s.status.add_sample(12.0);
        s.status.add_sample(f64::NAN);
    }

    let (mut app, _rx) = detached_app(state);
    let mut harness = Harness::new(|ctx| app.ui_layout(ctx));
    harness.set_size(egui::vec2(1200.0, 800.0));
    harness.run();

    // The failure shows up in the status line only; the rows stay
    harness.get_by_label_contains("DOWN");
    harness.get_by_label("sw01.lan");
}

#[test]
fn test_settings_window_updates_refresh_mode() {
    let state = empty_state();
    let (mut app, _rx) = detached_app(state.clone());

    let mut harness = Harness::new(|ctx| app.ui_layout(ctx));
    harness.set_size(egui::vec2(1200.0, 800.0));
    harness.run();

    harness.get_by_label("⚙").click();
    harness.run();

    harness.get_by_label("Fast (5s)").click();
    harness.run();

    assert_eq!(state.lock().unwrap().settings.refresh, RefreshMode::Fast);
}
