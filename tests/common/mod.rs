//! Shared blog fixture: articles, people, comments.
//!
//! ```text
//! articles ──author──> people ──articles──> articles
//!     │  └──editor (lazy)──> people
//!     └──comments──> comments ──author──> people
//! ```

#![allow(dead_code)]

use jsonapi_rs::{ResourceDefinition, ResourceGraph};

#[derive(Debug, Clone, Default)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author: Option<Person>,
    /// Outer `None`: not loaded by the data layer.
    pub editor: Option<Option<Person>>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default)]
pub struct Person {
    /// Empty string stands for "no identity".
    pub id: String,
    pub name: String,
    pub age: u32,
    /// `None`: not loaded by the data layer.
    pub articles: Option<Vec<Article>>,
}

#[derive(Debug, Clone, Default)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub author: Option<Person>,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn non_empty(id: &str) -> Option<String> {
    (!id.is_empty()).then(|| id.to_owned())
}

pub fn graph() -> ResourceGraph {
    init_tracing();
    ResourceGraph::builder()
        .add(
            ResourceDefinition::<Article>::new("articles", |a| non_empty(&a.id))
                .attribute("title", |a| a.title.clone())
                .to_one("author", "people", |a| a.author.as_ref())
                .to_one_lazy("editor", "people", |a| a.editor.as_ref().map(Option::as_ref))
                .to_many("comments", "comments", |a| a.comments.as_slice()),
        )
        .add(
            ResourceDefinition::<Person>::new("people", |p| non_empty(&p.id))
                .attribute("name", |p| p.name.clone())
                .attribute("age", |p| p.age)
                .to_many_lazy("articles", "articles", |p| p.articles.as_deref()),
        )
        .add(
            ResourceDefinition::<Comment>::new("comments", |c| non_empty(&c.id))
                .attribute("body", |c| c.body.clone())
                .to_one("author", "people", |c| c.author.as_ref()),
        )
        .build()
        .expect("fixture graph is valid")
}

pub fn person(id: &str, name: &str) -> Person {
    Person { id: id.into(), name: name.into(), age: 42, articles: None }
}

pub fn article(id: &str, title: &str) -> Article {
    Article { id: id.into(), title: title.into(), ..Default::default() }
}

pub fn comment(id: &str, body: &str) -> Comment {
    Comment { id: id.into(), body: body.into(), author: None }
}
