use crate::store::Record;
use change_notifier::{Notifiable, ResourceId};
use serde::{Deserialize, Serialize};

const MAX_TITLE_LEN: usize = 120;

/// A published article.
///
/// # Notifications
/// Implements [`Notifiable`] so that the store's lifecycle hooks can broadcast it. The
/// serialized form (everything except validation errors) is the update payload.
///
/// See [`impl Record for Article`](#impl-Record-for-Article) for how creation and update
/// payloads are applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub author: String,
    #[serde(skip)]
    errors: Vec<String>,
}

/// Payload for creating an article.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleCreate {
    pub title: String,
    pub body: String,
    pub author: String,
}

/// Payload for updating an article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Record for Article {
    type Create = ArticleCreate;
    type Update = ArticleUpdate;

    fn from_create_params(id: u32, params: ArticleCreate) -> Self {
        Self {
            id,
            title: params.title,
            body: params.body,
            author: params.author,
            errors: Vec::new(),
        }
    }

    fn apply_update(&mut self, update: ArticleUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
    }

    fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.title.trim().is_empty() {
            self.errors.push("title cannot be blank".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            self.errors
                .push(format!("title is longer than {} characters", MAX_TITLE_LEN));
        }
        if self.author.trim().is_empty() {
            self.errors.push("author cannot be blank".to_string());
        }
        self.errors.is_empty()
    }

    fn validation_errors(&self) -> Vec<String> {
        self.errors.clone()
    }
}

impl Notifiable for Article {
    fn topic(&self) -> String {
        format!("https://example.com/articles/{}", self.id)
    }

    fn id(&self) -> ResourceId {
        self.id.into()
    }

    fn targets(&self) -> Vec<String> {
        vec!["readers".to_string(), format!("author:{}", self.author)]
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article::from_create_params(
            1,
            ArticleCreate {
                title: title.to_string(),
                body: "text".to_string(),
                author: "ann".to_string(),
            },
        )
    }

    #[test]
    fn valid_article_has_no_errors() {
        let mut a = article("Hello");
        assert!(a.validate());
        assert!(!a.has_errors());
    }

    #[test]
    fn blank_and_long_titles_are_rejected() {
        let mut a = article("  ");
        assert!(!a.validate());
        assert_eq!(a.validation_errors(), ["title cannot be blank"]);

        let mut a = article(&"x".repeat(MAX_TITLE_LEN + 1));
        assert!(!a.validate());
        assert!(a.has_errors());
    }

    #[test]
    fn update_keeps_unset_fields() {
        let mut a = article("Hello");
        a.apply_update(ArticleUpdate {
            body: Some("new".into()),
            ..Default::default()
        });
        assert_eq!(a.title, "Hello");
        assert_eq!(a.body, "new");
    }

    #[test]
    fn errors_are_not_serialized() {
        let mut a = article("");
        a.validate();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            r#"{"id":1,"title":"","body":"text","author":"ann"}"#
        );
    }
}
