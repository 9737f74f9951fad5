use log::debug;

use crate::{
    filter::ALL_TAGS,
    route::{Location, Route},
    store::PostStore,
};

/// Everything the page shows that is not derived from the post data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current_tag: String,
    pub search_query: String,
    pub is_panel_open: bool,
    /// Id of the post open in the reader.
    pub reading: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_tag: ALL_TAGS.to_string(),
            search_query: String::new(),
            is_panel_open: false,
            reading: None,
        }
    }
}

impl ViewState {
    pub fn is_reading(&self) -> bool {
        self.reading.is_some()
    }

    /// Page scrolling is locked exactly while the reader is open.
    pub fn is_scroll_locked(&self) -> bool {
        self.is_reading()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// First render of the page at the given url, including a submitted
    /// search form. Never pushes history.
    Load(String),
    /// The history cursor moved; the url is the new current entry.
    PopState(String),
    ToggleTagPanel,
    SelectTag(String),
    Search(String),
    OpenPost(String),
    CloseReader,
}

/// Result of applying an [`Action`]: the next state and an optional url to
/// push onto the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub push: Option<String>,
}

fn open_if_known(store: &PostStore, id: &str) -> Option<String> {
    if store.find(id).is_some() {
        Some(id.to_string())
    } else {
        debug!("No post with id {:?}; reader stays closed", id);
        None
    }
}

pub fn update(state: &ViewState, action: Action, store: &PostStore, base_path: &str) -> Transition {
    let mut next = state.clone();
    let mut push = None;

    match action {
        Action::Load(url) => {
            let location = Location::parse(&url);
            next = ViewState::default();
            if let Some(tag) = location.params.tag {
                next.current_tag = tag;
            }
            if let Some(query) = location.params.search {
                next.search_query = query;
            }
            next.reading = location.params.post.and_then(|id| open_if_known(store, &id));
        }
        Action::PopState(url) => match Location::parse(&url).route() {
            Route::Reading(id) => {
                if let Some(id) = open_if_known(store, &id) {
                    next.reading = Some(id);
                }
            }
            Route::Tagged(tag) => {
                next.reading = None;
                next.current_tag = tag;
            }
            Route::List => {
                next.reading = None;
                next.current_tag = ALL_TAGS.to_string();
            }
        },
        Action::ToggleTagPanel => {
            next.is_panel_open = !state.is_panel_open;
        }
        Action::SelectTag(tag) => {
            next.is_panel_open = false;
            push = Some(if tag == ALL_TAGS {
                Route::List.href(base_path)
            } else {
                Route::Tagged(tag.clone()).href(base_path)
            });
            next.current_tag = tag;
        }
        Action::Search(query) => {
            next.search_query = query;
        }
        Action::OpenPost(id) => {
            push = Some(Route::Reading(id.clone()).href(base_path));
            if let Some(id) = open_if_known(store, &id) {
                next.reading = Some(id);
            }
        }
        Action::CloseReader => {
            next.reading = None;
            push = Some(Route::List.href(base_path));
        }
    }

    Transition { state: next, push }
}
