//! View model to markup. Nothing in here touches state or history.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{filter::ALL_TAGS, post::Post, route::Route};

pub const NO_MATCHES: &str = "No matches found.";

/// What a card shows under its title.
#[derive(Debug, Clone)]
pub enum Excerpt<'a> {
    Description(&'a str),
    Snippet(Markup),
}

#[derive(Debug, Clone)]
pub struct CardView<'a> {
    pub post: &'a Post,
    pub excerpt: Excerpt<'a>,
}

#[derive(Debug, Clone)]
pub struct ReaderView<'a> {
    pub post: &'a Post,
    pub body_html: String,
}

#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub blog_name: &'a str,
    pub base_path: &'a str,
    pub tags: &'a [String],
    pub current_tag: &'a str,
    pub is_panel_open: bool,
    pub search_query: &'a str,
    pub cards: Vec<CardView<'a>>,
    pub reader: Option<ReaderView<'a>>,
}

fn tag_href(tag: &str, base_path: &str) -> String {
    if tag == ALL_TAGS {
        Route::List.href(base_path)
    } else {
        Route::Tagged(tag.to_string()).href(base_path)
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "display: block"
    } else {
        "display: none"
    }
}

pub fn render_card(card: &CardView, base_path: &str) -> Markup {
    let post = card.post;
    html! {
        div.post-card data-post=(post.id) {
            a.post-link href=(Route::Reading(post.id.clone()).href(base_path)) {
                div.card-header-row {
                    span.post-meta { (post.date) }
                    @for tag in &post.tags {
                        span.card-tag { (tag) }
                    }
                }
                h3.post-title { (post.title) }
                @if let Some(cover) = post.cover_url() {
                    img.post-cover-thumb src=(cover) loading="lazy" onerror="this.style.display='none'";
                }
                div.post-excerpt {
                    @match &card.excerpt {
                        Excerpt::Description(desc) => { (desc) }
                        Excerpt::Snippet(snippet) => { (snippet) }
                    }
                }
                span.read-more-btn { "Read Article" }
            }
        }
    }
}

/// Contents of `#posts-container`.
pub fn render_posts(cards: &[CardView], base_path: &str) -> Markup {
    html! {
        @if cards.is_empty() {
            div.no-matches { (NO_MATCHES) }
        } @else {
            @for card in cards {
                (render_card(card, base_path))
            }
        }
    }
}

/// Contents of `#tagGrid`: "All" followed by every tag.
pub fn render_tag_grid(tags: &[String], current_tag: &str, base_path: &str) -> Markup {
    html! {
        @for tag in std::iter::once(ALL_TAGS).chain(tags.iter().map(String::as_str)) {
            a.tag-option.selected[tag == current_tag] href=(tag_href(tag, base_path)) data-tag=(tag) {
                (tag)
            }
        }
    }
}

pub fn filter_button_text(current_tag: &str) -> &str {
    if current_tag == ALL_TAGS {
        "Tags"
    } else {
        current_tag
    }
}

pub fn render_filter_button(current_tag: &str, is_panel_open: bool) -> Markup {
    let highlighted = is_panel_open || current_tag != ALL_TAGS;
    let border = if highlighted {
        "border-color: var(--primary)"
    } else {
        "border-color: var(--line-color)"
    };
    html! {
        button #filterBtn.filter-btn.active[current_tag != ALL_TAGS] style=(border) {
            span #filterBtnText { (filter_button_text(current_tag)) }
        }
    }
}

/// The `#article-reader` overlay. Hidden and empty when nothing is open.
pub fn render_reader(reader: Option<&ReaderView>, base_path: &str) -> Markup {
    html! {
        div #article-reader style=(display(reader.is_some())) {
            a.close-btn href=(base_path) { "Close" }
            div #reader-body {
                @if let Some(reader) = reader {
                    (PreEscaped(&reader.body_html))
                }
            }
        }
    }
}

pub fn render_page(view: &PageView) -> Markup {
    let reading = view.reader.is_some();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title {
                    @if let Some(reader) = &view.reader {
                        (reader.post.title) " - "
                    }
                    (view.blog_name)
                }
                link rel="stylesheet" href="style.css";
            }
            body style=(if reading { "overflow: hidden" } else { "overflow: auto" }) {
                header.toolbar {
                    form.search-form method="get" action=(view.base_path) {
                        input #searchInput type="search" name="q" placeholder="Search" value=(view.search_query);
                        @if view.current_tag != ALL_TAGS {
                            input type="hidden" name="tag" value=(view.current_tag);
                        }
                    }
                    (render_filter_button(view.current_tag, view.is_panel_open))
                }
                div #tagPanel style=(display(view.is_panel_open)) {
                    div #tagGrid {
                        (render_tag_grid(view.tags, view.current_tag, view.base_path))
                    }
                }
                div #posts-container {
                    (render_posts(&view.cards, view.base_path))
                }
                (render_reader(view.reader.as_ref(), view.base_path))
            }
        }
    }
}
