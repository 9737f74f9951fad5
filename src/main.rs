use std::{fs::OpenOptions, io::Write, path::PathBuf};

use anyhow::{bail, Context};
use clap::{command, Arg, ArgAction, Command};
use log::info;
use postdeck::{route::Location, Action, App, MarkdownRenderer, PostStore, SiteConfig};

fn cli() -> Command {
    command!().args(&[
        Arg::new("posts")
            .help("Post data: a JSON array of posts, or a directory of Markdown files")
            .value_parser(clap::value_parser!(PathBuf))
            .required(true),
        Arg::new("url")
            .long("url")
            .help("Location to render, e.g. \"/?tag=Rust\" or \"/?post=hello\"")
            .default_value("/"),
        Arg::new("search")
            .long("search")
            .help("Contents of the search box"),
        Arg::new("out")
            .long("out")
            .short('o')
            .help("Output file. Written to stdout when omitted.")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("hard_breaks")
            .long("hard-breaks")
            .help("Render soft line breaks in posts as <br>")
            .action(ArgAction::SetTrue),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let posts: &PathBuf = matches
        .get_one("posts")
        .context("posts argument is required")?;
    if !posts.exists() {
        bail!("{:?} does not exist.", posts);
    }
    let out: Option<&PathBuf> = matches.get_one("out");
    if out.is_some_and(|o| o.is_dir()) {
        bail!("out must be a file, not a directory.");
    }
    let url: &String = matches.get_one("url").context("url has a default")?;

    let config = SiteConfig::new(
        SiteConfig::blog_name_from_env(),
        &Location::parse(url).path,
        matches.get_flag("hard_breaks"),
    );
    let markdown = MarkdownRenderer::new(config.hard_breaks);
    let store = PostStore::load(posts, &markdown)?;

    let mut app = App::new(store, markdown, config, url);
    if let Some(query) = matches.get_one::<String>("search") {
        app.dispatch(Action::Search(query.clone()));
    }
    info!(
        "Rendering {} of {} posts at {:?}",
        app.visible_posts().len(),
        app.store().len(),
        app.location()
    );

    let html = app.render().into_string();
    match out {
        Some(path) => {
            let mut fd = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("while opening {:?}", path))?;
            fd.write_all(html.as_bytes())?;
        }
        None => std::io::stdout().write_all(html.as_bytes())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_argument_is_required() {
        assert!(cli().try_get_matches_from(["postdeck"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let matches = cli()
            .try_get_matches_from(["postdeck", "posts.json"])
            .expect("Should parse with only posts");
        assert_eq!(matches.get_one::<PathBuf>("posts"), Some(&PathBuf::from("posts.json")));
        assert_eq!(matches.get_one::<String>("url").map(String::as_str), Some("/"));
        assert!(matches.get_one::<String>("search").is_none());
        assert!(!matches.get_flag("hard_breaks"));
    }

    #[test]
    fn test_cli_debug_assert() {
        cli().debug_assert();
    }
}
