//! Mapping between the address bar and the page state.
//!
//! `post=<id>` opens the reader and `tag=<name>` applies a tag filter.
//! `q=<text>` is what the search form submits; it only fills the search box
//! on load and never affects the route. Everything else is ignored.

use url::form_urlencoded;

/// Query parameters understood by the page. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    pub post: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// A url split into its path and the parameters we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: UrlParams,
}

impl Location {
    pub fn parse(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        let mut params = UrlParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            // first occurrence wins
            match key.as_ref() {
                "post" if params.post.is_none() => params.post = Some(value.into_owned()),
                "tag" if params.tag.is_none() => params.tag = Some(value.into_owned()),
                "q" if params.search.is_none() => params.search = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            path: path.to_string(),
            params,
        }
    }

    pub fn route(&self) -> Route {
        Route::from_params(&self.params)
    }
}

/// The three observable address bar states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Tagged(String),
    Reading(String),
}

impl Route {
    /// `post` wins over `tag` when both are present.
    pub fn from_params(params: &UrlParams) -> Self {
        match (&params.post, &params.tag) {
            (Some(id), _) => Route::Reading(id.clone()),
            (None, Some(tag)) => Route::Tagged(tag.clone()),
            (None, None) => Route::List,
        }
    }

    pub fn href(&self, base_path: &str) -> String {
        let (key, value) = match self {
            Route::List => return base_path.to_string(),
            Route::Tagged(tag) => ("tag", tag),
            Route::Reading(id) => ("post", id),
        };
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();
        format!("{}?{}", base_path, query)
    }
}
