use std::{
    cmp::Ordering,
    collections::{HashSet, VecDeque},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{anyhow, bail, Context};
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};

use crate::{markdown::MarkdownRenderer, post::Post, text::strip_html};

/// A post together with the plain text of its rendered content.
#[derive(Debug, Clone)]
pub struct IndexedPost {
    pub post: Post,
    pub plain_text: String,
}

/// Immutable, date-sorted collection of posts.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    entries: Vec<IndexedPost>,
    tags: Vec<String>,
}

/// Newest first. Undated posts go last. Ties keep their input order, as
/// `sort_by` is stable.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.timestamp(), b.timestamp()) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

impl PostStore {
    pub fn new(mut posts: Vec<Post>, markdown: &MarkdownRenderer) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        for post in posts.iter() {
            if !seen.insert(post.id.as_str()) {
                bail!("Duplicate post id: {}", post.id);
            }
            if post.timestamp().is_none() {
                warn!("Post {:?} has an unparsable date {:?}", post.id, post.date);
            }
        }

        sort_posts(&mut posts);

        let mut tags: Vec<String> = vec![];
        for tag in posts.iter().flat_map(|p| p.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        let entries = posts
            .into_iter()
            .map(|post| {
                let plain_text = strip_html(&markdown.render(&post.content));
                IndexedPost { post, plain_text }
            })
            .collect::<Vec<_>>();

        info!("Loaded {} posts with {} tags", entries.len(), tags.len());
        Ok(Self { entries, tags })
    }

    pub fn from_json_str(json: &str, markdown: &MarkdownRenderer) -> anyhow::Result<Self> {
        let posts: Vec<Post> = serde_json::from_str(json).context("Invalid post data")?;
        Self::new(posts, markdown)
    }

    /// Loads a `.json` post array, or every `.md` file below a directory.
    pub fn load(path: &Path, markdown: &MarkdownRenderer) -> anyhow::Result<Self> {
        if path.is_dir() {
            Self::new(load_markdown_dir(path)?, markdown)
        } else {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("while reading {:?}", path))?;
            Self::from_json_str(&json, markdown).with_context(|| format!("while loading {:?}", path))
        }
    }

    pub fn entries(&self) -> &[IndexedPost] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct tags in first-seen order over the sorted posts.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.entries.iter().map(|e| &e.post).find(|p| p.id == id)
    }
}

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\A---\r?\n(?:(.*?)\r?\n)?---(?:\r?\n|\z)(.*)\z")
        .dot_matches_new_line(true)
        .build()
        .expect("header pattern")
});

/// Parses a Markdown file with an optional pandoc-style metadata block.
///
/// Supported keys: `id`, `title`, `date`, `desc`/`description`, `tag`/`tags`
/// (comma separated) and `cover`. `id` defaults to `default_id`.
pub fn parse_post_file(content: &str, default_id: &str) -> anyhow::Result<Post> {
    let mut post = Post {
        id: default_id.to_string(),
        title: String::new(),
        date: String::new(),
        desc: String::new(),
        content: String::new(),
        tags: vec![],
        cover: None,
    };

    post.content = if let Some(caps) = HEADER_PATTERN.captures(content) {
        let header = caps.get(1).map_or("", |m| m.as_str());
        for line in header.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("Invalid header: {}", line))?;
            let value = value.trim();
            match name.trim() {
                "id" => post.id = value.to_string(),
                "title" => post.title = value.to_string(),
                "date" => post.date = value.to_string(),
                "desc" | "description" => post.desc = value.to_string(),
                "cover" => post.cover = Some(value.to_string()),
                "tag" | "tags" => {
                    post.tags = value
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                other => debug!("Ignoring header key {:?}", other),
            }
        }
        caps[2].to_string()
    } else {
        content.to_string()
    };

    if post.id.is_empty() {
        bail!("Post id must not be empty");
    }
    if post.title.is_empty() {
        post.title = post.id.clone();
    }

    Ok(post)
}

fn load_markdown_dir(root: &Path) -> anyhow::Result<Vec<Post>> {
    let mut posts = vec![];

    // traversing `root` breadth first, files in name order
    let mut q = VecDeque::new();
    q.push_back(PathBuf::new());
    while let Some(dir) = q.pop_front() {
        let mut entries = std::fs::read_dir(root.join(&dir))
            .with_context(|| format!("while reading directory {:?}", root.join(&dir)))?
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let relative = dir.join(entry.file_name());
            let meta = entry.metadata()?;
            if meta.is_dir() {
                q.push_back(relative);
            } else if meta.is_file() && relative.extension().is_some_and(|e| e == "md") {
                let default_id = relative
                    .with_extension("")
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                let content = std::fs::read_to_string(entry.path())?;
                let post = parse_post_file(&content, &default_id)
                    .with_context(|| format!("while preprocessing {:?}", relative))?;
                debug!("Loaded {:?} as {:?}", relative, post.id);
                posts.push(post);
            }
        }
    }

    Ok(posts)
}
