//! End-to-end tests for a browsing session: filtering, searching, reading
//! and moving through history.

use anyhow::Result;
use postdeck::{filter::ALL_TAGS, renderer::NO_MATCHES, Action, App, MarkdownRenderer, PostStore, SiteConfig};

const POSTS: &str = r##"[
    {"id":"intro","title":"Hello Blog","date":"2023-12-24","desc":"The first post","content":"# Hi\nhello world","tags":["Life"]},
    {"id":"borrow","title":"Borrow checker notes","date":"2024-03-02","desc":"Lifetimes, again","content":"The **borrow checker** rejects aliasing.\n\nSay hello to `&mut`.","tags":["Rust","Notes"],"cover":"https://example.com/borrow.png"},
    {"id":"axum","title":"Serving HTML","date":"2024-03-02","desc":"A tiny server","content":"Routing with axum.","tags":["Rust","Web"]},
    {"id":"draft","title":"Undated draft","date":"tbd","desc":"no date yet","content":"draft text"}
]"##;

fn open(url: &str) -> Result<App> {
    let markdown = MarkdownRenderer::default();
    let store = PostStore::from_json_str(POSTS, &markdown)?;
    Ok(App::new(store, markdown, SiteConfig::default(), url))
}

fn visible(app: &App) -> Vec<String> {
    app.visible_posts().iter().map(|p| p.id.clone()).collect()
}

/// Tests sort order: newest first, same-day posts in data order, undated last.
#[test]
fn test_initial_order() -> Result<()> {
    let app = open("/")?;
    assert_eq!(visible(&app), ["borrow", "axum", "intro", "draft"]);
    assert_eq!(app.store().tags(), ["Rust", "Notes", "Web", "Life"]);
    Ok(())
}

/// Tests tag selection updates list, button and url.
#[test]
fn test_select_tag_flow() -> Result<()> {
    // Arrange
    let mut app = open("/")?;

    // Act
    app.dispatch(Action::ToggleTagPanel);
    let with_panel = app.render().into_string();
    app.dispatch(Action::SelectTag("Rust".into()));
    let html = app.render().into_string();

    // Assert
    assert!(with_panel.contains("<div id=\"tagPanel\" style=\"display: block\">"));
    assert!(html.contains("<div id=\"tagPanel\" style=\"display: none\">"));
    assert_eq!(visible(&app), ["borrow", "axum"]);
    assert_eq!(app.location(), "/?tag=Rust");
    assert!(html.contains("<span id=\"filterBtnText\">Rust</span>"));
    assert!(html.contains("class=\"tag-option selected\" href=\"/?tag=Rust\""));
    Ok(())
}

/// Tests search combined with an active tag and snippet excerpts.
#[test]
fn test_search_within_tag() -> Result<()> {
    let mut app = open("/?tag=Rust")?;
    app.dispatch(Action::Search("Hello".into()));

    assert_eq!(visible(&app), ["borrow"]);
    let html = app.render().into_string();
    assert!(
        html.contains("<span class=\"search-highlight\">hello</span>"),
        "Should highlight match in excerpt: {}",
        html
    );
    assert!(html.contains("value=\"Hello\""));
    Ok(())
}

/// Tests that the search box matches date strings.
#[test]
fn test_search_by_date() -> Result<()> {
    let mut app = open("/")?;
    app.dispatch(Action::Search("2024-03".into()));
    assert_eq!(visible(&app), ["borrow", "axum"]);
    Ok(())
}

/// Tests placeholder rendering when nothing matches.
#[test]
fn test_no_matches() -> Result<()> {
    let mut app = open("/?tag=Life")?;
    app.dispatch(Action::Search("axum".into()));

    assert!(visible(&app).is_empty());
    assert!(app.render().into_string().contains(NO_MATCHES));
    Ok(())
}

/// Tests that opening then closing a post returns to the pre-open path.
#[test]
fn test_open_close_round_trip() -> Result<()> {
    // Arrange
    let mut app = open("/")?;

    // Act
    app.dispatch(Action::OpenPost("borrow".into()));
    let reading = app.render().into_string();
    let reading_url = app.location().to_string();
    app.dispatch(Action::CloseReader);

    // Assert
    assert_eq!(reading_url, "/?post=borrow");
    assert!(reading.contains("<strong>borrow checker</strong>"));
    assert!(reading.contains("<body style=\"overflow: hidden\">"));
    assert_eq!(app.location(), "/");
    assert!(!app.state().is_reading());
    assert!(app.render().into_string().contains("<body style=\"overflow: auto\">"));
    Ok(())
}

/// Tests back and forward replay state without adding history entries.
#[test]
fn test_back_and_forward() -> Result<()> {
    let mut app = open("/")?;
    app.dispatch(Action::SelectTag("Web".into()));
    app.dispatch(Action::OpenPost("axum".into()));
    assert_eq!(app.history().len(), 3);

    assert!(app.back());
    assert_eq!(app.location(), "/?tag=Web");
    assert!(!app.state().is_reading());
    assert_eq!(app.state().current_tag, "Web");

    assert!(app.back());
    assert_eq!(app.state().current_tag, ALL_TAGS);
    assert!(!app.back());

    assert!(app.forward());
    assert!(app.forward());
    assert_eq!(app.state().reading.as_deref(), Some("axum"));
    assert!(!app.forward());
    assert_eq!(app.history().len(), 3);
    Ok(())
}

/// Tests that unknown post ids never open the reader.
#[test]
fn test_unknown_post() -> Result<()> {
    let mut app = open("/?post=missing")?;
    assert!(!app.state().is_reading());

    app.dispatch(Action::OpenPost("missing".into()));
    assert!(!app.state().is_reading());
    assert_eq!(app.location(), "/?post=missing");
    assert!(app.render().into_string().contains("<div id=\"article-reader\" style=\"display: none\">"));
    Ok(())
}

/// Tests selecting "All" clears the tag and pushes the bare base path.
#[test]
fn test_select_all_under_base_path() -> Result<()> {
    let markdown = MarkdownRenderer::default();
    let store = PostStore::from_json_str(POSTS, &markdown)?;
    let config = SiteConfig::new("diary".to_string(), "/blog/", false);
    let mut app = App::new(store, markdown, config, "/blog/?tag=Rust");

    app.dispatch(Action::SelectTag(ALL_TAGS.into()));

    assert_eq!(app.location(), "/blog/");
    assert_eq!(visible(&app).len(), 4);
    let html = app.render().into_string();
    assert!(html.contains("<span id=\"filterBtnText\">Tags</span>"));
    assert!(html.contains("<title>diary</title>"));
    Ok(())
}

/// Tests the cover image and its error handler are emitted.
#[test]
fn test_cover_image() -> Result<()> {
    let app = open("/?tag=Notes")?;
    let html = app.render().into_string();
    assert!(html.contains("src=\"https://example.com/borrow.png\""));
    assert!(html.contains("onerror=\"this.style.display='none'\""));
    Ok(())
}

/// Tests that submitting the rendered search form reproduces the search.
#[test]
fn test_search_form_round_trip() -> Result<()> {
    // Arrange
    let mut app = open("/?tag=Rust")?;
    app.dispatch(Action::Search("hello".into()));
    let html = app.render().into_string();
    assert!(html.contains("name=\"q\""));
    assert!(html.contains("<input type=\"hidden\" name=\"tag\" value=\"Rust\">"));

    // Act
    let submitted = open("/?q=hello")?;
    let submitted_with_tag = open("/?q=hello&tag=Rust")?;

    // Assert
    assert_eq!(submitted.state().search_query, "hello");
    assert_eq!(visible(&submitted), ["borrow", "intro"]);
    assert_eq!(visible(&submitted_with_tag), ["borrow"]);
    assert!(submitted
        .render()
        .into_string()
        .contains("<span class=\"search-highlight\">hello</span>"));
    Ok(())
}
