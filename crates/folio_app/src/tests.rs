//! Whole-page flows over the in-memory host

use folio_core::{
    Document, ElementId, EventOutcome, HistoryState, Key, MemoryDocument, MemoryNavigator,
    MemoryStorage, NodeSpec, PageEvent, Rect, ScrollOptions, Selector, Storage,
};
use folio_effects::{LoaderPhase, NotificationKind, SUCCESS_MESSAGE, THEME_KEY};

use crate::app::PortfolioApp;
use crate::config::SiteConfig;
use crate::error::AppError;

type TestApp = PortfolioApp<MemoryDocument, MemoryNavigator, MemoryStorage>;

/// A landing page with the markup every effect looks for
fn landing_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.set_title("Home | Portfolio");
    let body = doc.body();

    doc.append(
        body,
        NodeSpec::new("nav").id("navbar").child(
            NodeSpec::new("div").class("nav-container").children([
                NodeSpec::new("button").id("mobile-menu-btn").text("☰"),
                NodeSpec::new("ul").id("nav-links").children([
                    NodeSpec::new("a")
                        .class("nav-link active")
                        .id("nav-about")
                        .attr("href", "#about")
                        .text("About"),
                    NodeSpec::new("a")
                        .class("nav-link")
                        .id("nav-projects")
                        .attr("href", "projects.html")
                        .text("Projects"),
                    NodeSpec::new("a")
                        .class("nav-link")
                        .id("nav-home")
                        .attr("href", "index.html")
                        .text("Home"),
                ]),
            ]),
        ),
    );

    doc.append(
        body,
        NodeSpec::new("main").children([
            NodeSpec::new("section")
                .class("hero")
                .layout(Rect::new(0.0, 0.0, 1280.0, 800.0))
                .children([
                    NodeSpec::new("h1").class("hero-title"),
                    NodeSpec::new("p").class("hero-subtitle"),
                    NodeSpec::new("a")
                        .class("btn btn-primary")
                        .id("cta")
                        .attr("href", "https://github.com/")
                        .child(NodeSpec::new("span").id("cta-label").text("GitHub")),
                ]),
            NodeSpec::new("section")
                .class("section")
                .id("about")
                .layout(Rect::new(0.0, 1200.0, 1280.0, 600.0))
                .children([
                    skill_category(Rect::new(0.0, 1250.0, 600.0, 200.0), "85"),
                    skill_category(Rect::new(640.0, 1250.0, 600.0, 200.0), "70"),
                ]),
            NodeSpec::new("div").children([
                NodeSpec::new("button").class("filter-btn active").attr("data-filter", "all"),
                NodeSpec::new("button")
                    .class("filter-btn")
                    .id("filter-web")
                    .attr("data-filter", "web"),
            ]),
            NodeSpec::new("form").id("contact-form").children([
                NodeSpec::new("input").attr("name", "name"),
                NodeSpec::new("input").attr("name", "email"),
                NodeSpec::new("textarea").attr("name", "message"),
            ]),
        ]),
    );
    doc
}

fn skill_category(rect: Rect, width: &str) -> NodeSpec {
    NodeSpec::new("div").class("skill-category").layout(rect).child(
        NodeSpec::new("div")
            .class("progress-bar")
            .attr("data-width", width)
            .layout(Rect::new(rect.x, rect.y + 50.0, 400.0, 10.0)),
    )
}

fn app_with(config: SiteConfig, path: &str) -> TestApp {
    let mut app = PortfolioApp::new(
        config,
        landing_page(),
        MemoryNavigator::new(path),
        MemoryStorage::new(),
    )
    .unwrap();
    app.seed_loader(7).unwrap();
    app.start(0);
    app
}

fn app() -> TestApp {
    app_with(SiteConfig::default(), "/index.html")
}

fn quiet_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.features.loader = false;
    config.features.typing = false;
    config
}

fn by_id(app: &TestApp, id: &str) -> ElementId {
    app.doc().element_by_id(id).unwrap()
}

fn click(app: &mut TestApp, id: &str) -> EventOutcome {
    let target = by_id(app, id);
    app.dispatch(PageEvent::Click { target })
}

fn scroll_to(app: &mut TestApp, y: f32) {
    let entries = app.doc_mut().scroll_to(y);
    for entry in entries {
        app.dispatch(PageEvent::Intersection(entry));
    }
    app.dispatch(PageEvent::Scroll { offset: y });
}

fn notifications(app: &TestApp) -> Vec<String> {
    let doc = app.doc();
    doc.query_all(&Selector::class("notification"))
        .into_iter()
        .map(|n| doc.text(n))
        .collect()
}

fn fill_form(app: &mut TestApp, name: &str, email: &str, message: &str) -> ElementId {
    let form = by_id(app, "contact-form");
    let fields = app.doc().children(form);
    for (field, value) in fields.into_iter().zip([name, email, message]) {
        app.doc_mut().set_attribute(field, "value", value);
    }
    form
}

#[test]
fn test_startup_prepares_page() {
    let app = app();
    let doc = app.doc();

    assert!(app.is_started());
    assert_eq!(doc.count(&Selector::class("page-transition-overlay")), 1);
    assert!(doc.element_by_id("transition-styles").is_some());
    assert!(doc.element_by_id("mobile-menu-styles").is_some());
    assert_eq!(doc.count(&Selector::class("page-loader")), 1);
    assert_eq!(doc.count(&Selector::class("theme-toggle")), 0);
    assert_eq!(
        app.nav().current_state(),
        Some(&HistoryState::new("/index.html"))
    );
    assert!(app.typing().is_some_and(|t| t.is_running()));

    let events = app.analytics().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "page_view");
    assert_eq!(events[0].data["page"], "/index.html");
    assert_eq!(events[0].data["title"], "Home | Portfolio");
}

#[test]
fn test_start_runs_once() {
    let mut app = app_with(quiet_config(), "/index.html");
    app.start(10);
    assert_eq!(app.doc().count(&Selector::class("page-transition-overlay")), 1);
    assert_eq!(app.analytics().events().len(), 1);
}

#[test]
fn test_internal_link_transition() {
    let mut app = app();
    let outcome = click(&mut app, "nav-projects");
    assert_eq!(outcome, EventOutcome::PREVENTED);

    let overlay = app
        .doc()
        .query(&Selector::class("page-transition-overlay"))
        .unwrap();
    let main = app.doc().query(&Selector::tag("main")).unwrap();
    assert!(app.doc().has_class(overlay, "active"));
    assert!(app.doc().has_class(main, "page-fade-out"));
    assert_eq!(app.nav().history_len(), 2);

    // Clicks during the transition do not start another one
    click(&mut app, "nav-home");

    app.advance_to(799);
    assert!(app.nav().assigned().is_empty());
    app.advance_to(800);
    assert_eq!(app.nav().assigned(), &["projects.html".to_string()]);
    app.advance_to(5000);
    assert_eq!(app.nav().assigned().len(), 1);
}

#[test]
fn test_current_page_link_is_prevented_noop() {
    let mut app = app();
    assert_eq!(click(&mut app, "nav-home"), EventOutcome::PREVENTED);
    assert!(!app.transition().is_active());
    assert_eq!(app.nav().history_len(), 1);
}

#[test]
fn test_external_link_is_left_alone() {
    let mut app = app_with(quiet_config(), "/index.html");
    assert_eq!(click(&mut app, "cta-label"), EventOutcome::IGNORED);
    assert!(!app.transition().is_active());

    let last = app.analytics().events().last().unwrap();
    assert_eq!(last.name, "button_click");
    assert_eq!(last.data["button_text"], "GitHub");
}

#[test]
fn test_pop_state_transitions_without_push() {
    let mut app = app();
    app.dispatch(PageEvent::PopState { state: None });
    assert!(!app.transition().is_active());

    app.dispatch(PageEvent::PopState {
        state: Some(HistoryState::new("/about.html")),
    });
    assert!(app.transition().is_active());
    assert_eq!(app.nav().history_len(), 1);
    app.advance_to(800);
    assert_eq!(app.nav().assigned(), &["/about.html".to_string()]);
}

#[test]
fn test_missing_overlay_falls_back_to_direct_navigation() {
    let mut app = app_with(quiet_config(), "/index.html");
    let overlay = app
        .doc()
        .query(&Selector::class("page-transition-overlay"))
        .unwrap();
    app.doc_mut().remove(overlay);

    assert!(app.navigate("/about.html", true).is_err());
    assert_eq!(click(&mut app, "nav-projects"), EventOutcome::PREVENTED);
    assert_eq!(app.nav().assigned(), &["projects.html".to_string()]);
}

#[test]
fn test_reveal_happens_once() {
    let mut app = app_with(quiet_config(), "/index.html");
    let initial = app.doc_mut().flush_intersections();
    for entry in initial {
        app.dispatch(PageEvent::Intersection(entry));
    }
    assert_eq!(app.reveal().revealed_count(), 0);

    scroll_to(&mut app, 1000.0);
    let about = by_id(&app, "about");
    assert!(app.doc().has_class(about, "animate-in"));
    app.advance_to(1000);
    assert_eq!(app.reveal().revealed_count(), 3);

    let bars = app.doc().query_all(&Selector::class("progress-bar"));
    assert_eq!(app.doc().style(bars[0], "width").as_deref(), Some("85%"));
    assert_eq!(app.doc().style(bars[1], "width").as_deref(), Some("70%"));

    scroll_to(&mut app, 0.0);
    scroll_to(&mut app, 1000.0);
    assert_eq!(app.reveal().revealed_count(), 3);
    assert!(app.doc().has_class(about, "animate-in"));
    assert!(app.timers().is_empty());
}

#[test]
fn test_navbar_follows_scroll() {
    let mut app = app_with(quiet_config(), "/index.html");
    let navbar = by_id(&app, "navbar");

    scroll_to(&mut app, 300.0);
    assert!(app.doc().has_class(navbar, "scrolled"));
    assert_eq!(
        app.doc().style(navbar, "transform").as_deref(),
        Some("translateY(-100%)")
    );
    scroll_to(&mut app, 20.0);
    assert!(!app.doc().has_class(navbar, "scrolled"));
    assert_eq!(app.doc().style(navbar, "transform").as_deref(), Some("translateY(0)"));
}

#[test]
fn test_typing_on_landing_page_only() {
    let mut config = quiet_config();
    config.features.typing = true;
    config.phrases = vec![folio_animation::PhrasePair::new("Hi", "Sub")];

    let mut app = app_with(config.clone(), "/");
    let title = app.doc().query(&Selector::class("hero-title")).unwrap();
    app.advance_to(1000);
    assert_eq!(app.doc().text(title), "H");
    app.advance_to(1100);
    assert_eq!(app.doc().text(title), "Hi");
    app.advance_to(3100);
    assert_eq!(app.doc().text(title), "H");
    app.advance_to(3150);
    assert_eq!(app.doc().text(title), "");

    let mut elsewhere = app_with(config, "/about.html");
    elsewhere.advance_to(5000);
    let title = elsewhere.doc().query(&Selector::class("hero-title")).unwrap();
    assert_eq!(elsewhere.doc().text(title), "");
    assert!(elsewhere.timers().is_empty());
}

#[test]
fn test_loader_completes_and_animates_entrance() {
    let mut app = app();
    let mut now = 0;
    while app
        .loader()
        .is_some_and(|l| l.phase() == LoaderPhase::Loading)
    {
        now += 100;
        app.advance_to(now);
        assert!(now < 100_000, "loader never completed");
    }
    assert_eq!(app.loader().map(|l| l.progress()), Some(100.0));

    app.advance_to(now + 799);
    assert_eq!(app.doc().count(&Selector::class("page-loader")), 1);
    app.advance_to(now + 800);
    assert_eq!(app.doc().count(&Selector::class("page-loader")), 0);
    assert!(app.doc().has_class(app.doc().body(), "loaded"));

    app.advance_to(now + 1100);
    let title = app.doc().query(&Selector::class("hero-title")).unwrap();
    assert!(app.doc().has_class(title, "animate-in"));
}

#[test]
fn test_rapid_notifications_leave_one() {
    let mut app = app_with(quiet_config(), "/index.html");
    app.notify("first", NotificationKind::Info);
    app.notify("second", NotificationKind::Error);
    assert_eq!(notifications(&app), vec!["second"]);

    app.advance_to(4300);
    assert!(notifications(&app).is_empty());
}

#[test]
fn test_contact_form_success() {
    let mut app = app_with(quiet_config(), "/index.html");
    let form = fill_form(&mut app, "A", "a@b.co", "hi");

    let outcome = app.dispatch(PageEvent::Submit { form });
    assert_eq!(outcome, EventOutcome::PREVENTED);
    assert_eq!(notifications(&app), vec![SUCCESS_MESSAGE]);
    assert!(app.doc().form_values(form).iter().all(|(_, v)| v.is_empty()));
}

#[test]
fn test_contact_form_rejects_empty_message() {
    let mut app = app_with(quiet_config(), "/index.html");
    let form = fill_form(&mut app, "A", "a@b.co", "");
    app.dispatch(PageEvent::Submit { form });
    assert_eq!(notifications(&app), vec!["Please fill in all required fields."]);

    let form = fill_form(&mut app, "A", "not-an-email", "hi");
    app.dispatch(PageEvent::Submit { form });
    assert_eq!(notifications(&app), vec!["Please enter a valid email address."]);
}

#[test]
fn test_fragment_link_scrolls_and_closes_menu() {
    let mut app = app_with(quiet_config(), "/index.html");
    click(&mut app, "mobile-menu-btn");
    assert!(app.menu().is_open(app.doc()));

    assert_eq!(click(&mut app, "nav-about"), EventOutcome::PREVENTED);
    let about = by_id(&app, "about");
    assert_eq!(
        app.doc().scroll_requests(),
        &[(about, ScrollOptions::smooth_start())]
    );
    assert!(!app.menu().is_open(app.doc()));
    assert!(!app.transition().is_active());

    let link = by_id(&app, "nav-about");
    assert!(app.doc().has_class(link, "active"));
    assert_eq!(app.doc().query_within(link, &Selector::class("ripple")).len(), 1);
    app.advance_to(600);
    assert!(app.doc().query_within(link, &Selector::class("ripple")).is_empty());
}

#[test]
fn test_menu_glyph_and_escape() {
    let mut app = app_with(quiet_config(), "/index.html");
    let button = by_id(&app, "mobile-menu-btn");

    click(&mut app, "mobile-menu-btn");
    assert_eq!(app.doc().text(button), "✕");
    app.dispatch(PageEvent::KeyDown { key: Key::Escape });
    assert_eq!(app.doc().text(button), "☰");
    assert!(!app.menu().is_open(app.doc()));
}

#[test]
fn test_filter_click() {
    let mut app = app_with(quiet_config(), "/index.html");
    let body = app.doc().body();
    for category in ["web", "ml"] {
        app.doc_mut().append(
            body,
            NodeSpec::new("div")
                .class("project-card")
                .attr("data-category", category),
        );
    }

    click(&mut app, "filter-web");
    app.advance_to(1000);
    assert_eq!(app.filter().active_filter(), Some("web"));
    let cards = app.doc().query_all(&Selector::class("project-card"));
    assert!(app.doc().has_class(cards[0], "show"));
    assert_eq!(app.doc().style(cards[1], "display").as_deref(), Some("none"));
}

#[test]
fn test_theme_toggle_persists() {
    let mut config = quiet_config();
    config.features.theme_toggle = true;
    let mut app = app_with(config, "/index.html");

    let toggle = app.doc().query(&Selector::class("theme-toggle")).unwrap();
    app.dispatch(PageEvent::Click { target: toggle });
    assert_eq!(app.storage().get_item(THEME_KEY).as_deref(), Some("dark"));
    assert_eq!(
        app.doc().attribute(app.doc().body(), "data-theme").as_deref(),
        Some("dark")
    );
}

#[test]
fn test_page_errors_are_only_logged() {
    let mut app = app_with(quiet_config(), "/index.html");
    let outcome = app.dispatch(PageEvent::Error {
        message: "ReferenceError: x is not defined".into(),
    });
    assert_eq!(outcome, EventOutcome::IGNORED);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = SiteConfig::default();
    config.phrases.clear();
    let result = PortfolioApp::new(
        config,
        MemoryDocument::new(),
        MemoryNavigator::new("/"),
        MemoryStorage::new(),
    );
    assert!(matches!(result, Err(AppError::Animation(_))));
}
