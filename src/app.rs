use log::debug;
use maud::Markup;

use crate::{
    config::SiteConfig,
    filter::{filter_posts, normalize_query},
    history::SessionHistory,
    markdown::MarkdownRenderer,
    post::Post,
    renderer::{render_page, CardView, Excerpt, PageView, ReaderView},
    state::{update, Action, ViewState},
    store::PostStore,
    text::smart_snippet,
};

/// The blog page: post data, view state and session history.
#[derive(Debug)]
pub struct App {
    store: PostStore,
    markdown: MarkdownRenderer,
    config: SiteConfig,
    state: ViewState,
    history: SessionHistory,
}

impl App {
    /// Opens the page at `url`, restoring tag and reader from its query.
    pub fn new(store: PostStore, markdown: MarkdownRenderer, config: SiteConfig, url: &str) -> Self {
        let mut app = Self {
            store,
            markdown,
            config,
            state: ViewState::default(),
            history: SessionHistory::new(url),
        };
        app.dispatch(Action::Load(url.to_string()));
        app
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        let transition = update(&self.state, action, &self.store, &self.config.base_path);
        self.state = transition.state;
        if let Some(url) = transition.push {
            self.history.push(url);
        }
    }

    /// Browser back button. Returns false at the start of the history.
    pub fn back(&mut self) -> bool {
        match self.history.back().map(str::to_string) {
            Some(url) => {
                self.dispatch(Action::PopState(url));
                true
            }
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.history.forward().map(str::to_string) {
            Some(url) => {
                self.dispatch(Action::PopState(url));
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn location(&self) -> &str {
        self.history.current()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Posts matching the current tag and search query, newest first.
    pub fn visible_posts(&self) -> Vec<&Post> {
        filter_posts(self.store.entries(), &self.state.current_tag, &self.state.search_query)
            .into_iter()
            .map(|e| &e.post)
            .collect()
    }

    pub fn view(&self) -> PageView<'_> {
        let query = normalize_query(&self.state.search_query);
        let cards = filter_posts(self.store.entries(), &self.state.current_tag, &query)
            .into_iter()
            .map(|entry| {
                let snippet = if query.is_empty() {
                    None
                } else {
                    smart_snippet(&entry.plain_text, &query)
                };
                CardView {
                    post: &entry.post,
                    excerpt: snippet.map_or(Excerpt::Description(&entry.post.desc), Excerpt::Snippet),
                }
            })
            .collect();

        let reader = self
            .state
            .reading
            .as_deref()
            .and_then(|id| self.store.find(id))
            .map(|post| ReaderView {
                post,
                body_html: self.markdown.render(&post.content),
            });

        PageView {
            blog_name: &self.config.blog_name,
            base_path: &self.config.base_path,
            tags: self.store.tags(),
            current_tag: &self.state.current_tag,
            is_panel_open: self.state.is_panel_open,
            search_query: &self.state.search_query,
            cards,
            reader,
        }
    }

    pub fn render(&self) -> Markup {
        render_page(&self.view())
    }
}
