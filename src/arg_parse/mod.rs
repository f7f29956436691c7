use std::io::Error;

#[derive(Debug, Clone)]
pub struct CmdArgs {
    pub query: Vec<String>,
    pub location: String,
    pub category: String,
    pub config: String,
}

impl CmdArgs {
    pub fn parse(args: Vec<String>) -> Result<Self, Error> {
        let mut query: Vec<String> = Vec::new();
        let mut location = String::from("raleigh");
        let mut category = String::from("taa");
        let mut config = String::from("./config.json");
        {
            let mut ap = argparse::ArgumentParser::new();
            ap.set_description(
                "Scrapes craigslist and alerts if any new posts matching a query have been posted",
            );
            ap.refer(&mut query)
                .add_argument("query", argparse::List, "Search value, one or more words")
                .required();
            ap.refer(&mut location).add_option(
                &["--location"],
                argparse::Store,
                "Which local craigslist to search",
            );
            ap.refer(&mut category).add_option(
                &["--category"],
                argparse::Store,
                "Which category to search",
            );
            ap.refer(&mut config).add_option(
                &["-c", "--config"],
                argparse::Store,
                "Config file path",
            );

            match ap.parse(args, &mut std::io::stdout(), &mut std::io::stderr()) {
                Ok(()) => {}
                Err(_) => {
                    return Err(Error::from(std::io::ErrorKind::InvalidInput));
                }
            }
        }

        if query.is_empty() {
            return Err(Error::from(std::io::ErrorKind::InvalidInput));
        }

        Ok(CmdArgs {
            query,
            location,
            category,
            config,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        std::iter::once("craigslist-alert")
            .chain(words.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let parsed = CmdArgs::parse(args(&["lego"])).unwrap();
        assert_eq!(parsed.query, vec!["lego".to_string()]);
        assert_eq!(parsed.location, "raleigh");
        assert_eq!(parsed.category, "taa");
        assert_eq!(parsed.config, "./config.json");
    }

    #[test]
    fn test_multi_word_query_and_options() {
        let parsed = CmdArgs::parse(args(&[
            "--location",
            "durham",
            "--category",
            "tag",
            "lego",
            "10225",
        ]))
        .unwrap();
        assert_eq!(parsed.query, vec!["lego".to_string(), "10225".to_string()]);
        assert_eq!(parsed.location, "durham");
        assert_eq!(parsed.category, "tag");
    }
}
