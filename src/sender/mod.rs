use crate::config::SmtpConfig;
use crate::listing::ListingRecord;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};

pub enum Sender {
    Console(ConsoleSender),
    Smtp(SmtpSender),
}

impl Sender {
    pub async fn send_alert(
        &self,
        new_posts: &[ListingRecord],
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Sender::Console(sender) => sender.send_alert(new_posts).await,
            Sender::Smtp(sender) => sender.send_alert(new_posts).await,
        }
    }
}

pub trait AlertSender {
    async fn send_alert(
        &self,
        new_posts: &[ListingRecord],
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Prints the digest to stdout; used when no SMTP block is configured.
pub struct ConsoleSender {}

pub struct SmtpSender {
    config: SmtpConfig,
}

impl SmtpSender {
    pub fn new(config: &SmtpConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl AlertSender for SmtpSender {
    async fn send_alert(
        &self,
        new_posts: &[ListingRecord],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let text_body = posts_to_text(new_posts);
        let html_body = posts_to_html(new_posts);
        let email = lettre::Message::builder()
            .from(self.config.from.parse()?)
            .to(self.config.to.parse()?)
            .subject(&self.config.subject)
            .multipart(
                MultiPart::mixed().multipart(
                    MultiPart::alternative()
                        .singlepart(SinglePart::plain(text_body))
                        .multipart(MultiPart::related().singlepart(SinglePart::html(html_body))),
                ),
            )?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());
        let mailer = SmtpTransport::relay(&self.config.host)?
            .credentials(creds)
            .build();

        match mailer.send(&email) {
            Ok(_) => return Ok(()),
            Err(e) => eprintln!("Could not send email: {e:?}"),
        }

        Ok(())
    }
}

impl AlertSender for ConsoleSender {
    async fn send_alert(
        &self,
        new_posts: &[ListingRecord],
    ) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", posts_to_text(new_posts));

        Ok(())
    }
}

/// Convert the new posts to an HTML body
pub fn posts_to_html(posts: &[ListingRecord]) -> String {
    let mut body =
        String::from("<html><head>Craigslist Alert</head><body><p>New posts:</p><div><ul>");
    for post in posts {
        body.push_str(&format!(
            "<li><a href=\"{url}\">{title}</a> {description}</li>",
            url = post.link,
            title = post.title,
            description = post.description,
        ));
    }
    body.push_str(
        format!(
            "</ul></div><p>Generated: {}</p></body></html>",
            formatted_now(),
        )
        .as_str(),
    );
    body
}

/// Convert the new posts to a plain text body
pub fn posts_to_text(posts: &[ListingRecord]) -> String {
    let mut body = String::from("New posts:\n\n");
    for post in posts {
        body.push_str(&format!(
            "* {title} - {url}\n",
            url = post.link,
            title = post.title
        ));
        if !post.description.is_empty() {
            body.push_str(&format!("  {}\n", post.description));
        }
    }
    body.push_str(format!("\nGenerated: {}", formatted_now()).as_str());
    body
}

fn formatted_now() -> String {
    chrono::Local::now().to_rfc2822()
}

#[cfg(test)]
mod test {
    use super::*;

    fn posts() -> Vec<ListingRecord> {
        vec![
            ListingRecord {
                id: "4510309330".to_string(),
                title: "Lego Star Wars".to_string(),
                description: "complete set".to_string(),
                link: "http://raleigh.example.org/tag/4510309330.html".to_string(),
            },
            ListingRecord {
                id: "4510309331".to_string(),
                title: "Lego R2-D2".to_string(),
                description: String::new(),
                link: "http://raleigh.example.org/tag/4510309331.html".to_string(),
            },
        ]
    }

    #[test]
    fn test_posts_to_text() {
        let body = posts_to_text(&posts());
        assert!(body.contains("* Lego Star Wars - http://raleigh.example.org/tag/4510309330.html"));
        assert!(body.contains("  complete set"));
        assert!(body.contains("* Lego R2-D2"));
    }

    #[test]
    fn test_posts_to_html() {
        let body = posts_to_html(&posts());
        assert!(body.contains(
            "<a href=\"http://raleigh.example.org/tag/4510309330.html\">Lego Star Wars</a>"
        ));
        assert!(body.contains("Generated:"));
    }

    #[tokio::test]
    async fn test_console_sender_is_ok() {
        let sender = Sender::Console(ConsoleSender {});
        assert!(sender.send_alert(&posts()).await.is_ok());
    }
}
