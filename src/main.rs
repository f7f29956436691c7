#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
mod arg_parse;
mod config;
mod fetcher;
mod filter;
mod listing;
mod sender;
mod storage;

use std::fs::OpenOptions;
use std::path::Path;

use crate::arg_parse::CmdArgs;
use crate::config::AppConfig;
use crate::fetcher::PostFetcher;
use crate::filter::{filter_blacklist, filter_new};
use crate::storage::{BlacklistStore, HistoryStore};

// One run is one fetch-filter-notify-persist cycle. Overlapping invocations
// race on the history file; the scheduler that triggers runs must serialize
// them.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = &CmdArgs::parse(std::env::args().collect())?;
    let config = AppConfig::from_file(&args.config.clone())?;

    let history_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(config.get_history_file())?;
    let mut history = HistoryStore::from_fs(history_file);
    let blacklist = BlacklistStore::load(Path::new(&config.get_blacklist_file()));

    // Fetch failures are fatal and leave the history untouched, so a broken
    // run is never recorded as a genuine "nothing new" result.
    let fetcher = PostFetcher::new(&config, &args.location)?;
    let posts = fetcher.search(&args.query, &args.category).await?;

    let kept = filter_blacklist(&posts, blacklist.patterns());
    let new_posts = filter_new(&kept, history.ids());

    if new_posts.is_empty() {
        println!("No new posts");
    } else {
        println!("Found new posts: {}", new_posts.len());
        // A failed notification doesn't block the history write; the same
        // posts won't be re-sent as "new" on the next run.
        if let Err(e) = config.get_sender().send_alert(&new_posts).await {
            eprintln!("Could not send the alert: {e}");
        }
    }

    // History records the whole blacklist-filtered set, not just the new
    // posts, so unchanged posts aren't re-notified on the next run.
    history.replace(&kept);
    history.dump()?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::listing::ListingRecord;

    fn post(id: &str, title: &str) -> ListingRecord {
        ListingRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            link: format!("http://raleigh.example.org/tag/{id}.html"),
        }
    }

    #[test]
    fn test_pipeline_blacklist_then_history() {
        let posts = vec![
            post("1", "Megablocks for sell"),
            post("2", "Lego Star Wars"),
            post("3", "Lego R2-D2"),
        ];
        let blacklist = vec!["megablocks".to_string()];
        let mut history = HistoryStore::from_fs(tempfile::tempfile().unwrap());
        history.replace(&[post("2", "Lego Star Wars")]);

        let kept = filter_blacklist(&posts, &blacklist);
        let new_posts = filter_new(&kept, history.ids());

        // only the unseen, non-blacklisted post is notification-worthy
        assert_eq!(new_posts.len(), 1);
        assert_eq!(new_posts[0].id, "3");

        // the persisted set is the blacklist survivors, not the new subset
        history.replace(&kept);
        history.dump().unwrap();
        history.reload().unwrap();
        assert!(history.contains("2"));
        assert!(history.contains("3"));
        assert!(!history.contains("1"));
    }

    #[test]
    fn test_pipeline_empty_fetch_writes_empty_history() {
        let mut history = HistoryStore::from_fs(tempfile::tempfile().unwrap());
        history.replace(&[post("1", "old")]);
        history.dump().unwrap();

        let posts: Vec<ListingRecord> = Vec::new();
        let kept = filter_blacklist(&posts, &[]);
        let new_posts = filter_new(&kept, history.ids());
        assert!(new_posts.is_empty());

        history.replace(&kept);
        history.dump().unwrap();
        history.reload().unwrap();
        assert!(history.ids().is_empty());
    }
}
