//! End-to-end tests for compound document assembly.
//!
//! Each test registers the blog fixture, builds a document with
//! `DocumentBuilder` and compares the serialized JSON.

mod common;

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{article, comment, graph, person};
use jsonapi_rs::{
    Cardinality, DocumentBuilder, Includes, Related, RelationshipDescriptor, ResourceDefinition,
    ResourceGraph, ResourceIdentifier,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// 1. Single resource with an included to-one relationship
// ============================================================================

#[test]
fn test_single_with_included_author() {
    let graph = graph();
    let mut post = article("1", "JSON:API paints my bikeshed!");
    post.author = Some(person("9", "Dan"));

    let includes = graph.includes("articles", ["author"]).unwrap();
    let doc = DocumentBuilder::new(&graph).single(Some(&post), &includes).unwrap();

    assert_eq!(
        doc.to_value().unwrap(),
        json!({
            "data": {
                "type": "articles",
                "id": "1",
                "attributes": {"title": "JSON:API paints my bikeshed!"},
                "relationships": {
                    "author": {"data": {"type": "people", "id": "9"}},
                    "comments": {"data": []}
                }
            },
            "included": [
                {"type": "people", "id": "9", "attributes": {"name": "Dan", "age": 42}}
            ]
        })
    );
}

// ============================================================================
// 2. Linkage without inclusion
// ============================================================================

#[test]
fn test_linkage_without_include_omits_included() {
    let graph = graph();
    let mut post = article("1", "Hello");
    post.comments = vec![comment("5", "First!"), comment("6", "I like XML better")];

    let doc = DocumentBuilder::new(&graph).single(Some(&post), &Includes::new()).unwrap();
    let json = doc.to_value().unwrap();

    assert_eq!(
        json["data"]["relationships"],
        json!({
            "author": {"data": null},
            "comments": {"data": [
                {"type": "comments", "id": "5"},
                {"type": "comments", "id": "6"}
            ]}
        })
    );
    assert!(json.get("included").is_none());
}

// ============================================================================
// 3. Shared related resource is included once
// ============================================================================

#[test]
fn test_shared_author_included_once() {
    let graph = graph();
    let mut first = article("1", "One");
    first.author = Some(person("9", "Dan"));
    let mut second = article("2", "Two");
    second.author = Some(person("9", "Dan"));

    let includes = graph.includes("articles", ["author"]).unwrap();
    let doc = DocumentBuilder::new(&graph).many([&first, &second], &includes).unwrap();

    assert_eq!(doc.data.len(), 2);
    assert_eq!(doc.included.len(), 1);
    assert_eq!(doc.included[0].identifier(), ResourceIdentifier::new("people", "9"));
}

// ============================================================================
// 4. Primary resource reached again through a chain
// ============================================================================

#[test]
fn test_primary_resource_also_included_when_reached() {
    let graph = graph();
    let mut author = person("9", "Dan");
    author.articles = Some(vec![article("1", "One"), article("2", "Two")]);
    let mut post = article("1", "One");
    post.author = Some(author);

    let includes = graph.includes("articles", ["author.articles"]).unwrap();
    let doc = DocumentBuilder::new(&graph).single(Some(&post), &includes).unwrap();

    let keys: Vec<String> = doc.included.iter().map(|r| r.identifier().to_string()).collect();
    assert_eq!(keys, ["people:9", "articles:1", "articles:2"]);

    let dan = doc.find_included(&ResourceIdentifier::new("people", "9")).unwrap();
    assert_eq!(
        serde_json::to_value(&dan.relationships).unwrap(),
        json!({"articles": {"data": [
            {"type": "articles", "id": "1"},
            {"type": "articles", "id": "2"}
        ]}})
    );

    // Included copies only carry linkage resolved by some chain.
    let copy = doc.find_included(&ResourceIdentifier::new("articles", "1")).unwrap();
    assert!(copy.relationships.is_empty());
}

// ============================================================================
// 5. Null linkage vs. not loaded
// ============================================================================

#[test]
fn test_null_to_one_kept_and_unloaded_omitted() {
    let graph = graph();
    let mut post = article("1", "Orphan");
    post.editor = None;
    post.author = None;

    let doc = DocumentBuilder::new(&graph).single(Some(&post), &Includes::new()).unwrap();
    let relationships = &doc.to_value().unwrap()["data"]["relationships"];

    assert_eq!(relationships["author"], json!({"data": null}));
    assert!(relationships.get("editor").is_none());
}

#[test]
fn test_loaded_editor_is_linked() {
    let graph = graph();
    let mut post = article("1", "Edited");
    post.editor = Some(Some(person("3", "Eve")));
    let mut unedited = article("2", "Raw");
    unedited.editor = Some(None);

    let doc = DocumentBuilder::new(&graph).many([&post, &unedited], &Includes::new()).unwrap();
    let json = doc.to_value().unwrap();

    assert_eq!(json["data"][0]["relationships"]["editor"], json!({"data": {"type": "people", "id": "3"}}));
    assert_eq!(json["data"][1]["relationships"]["editor"], json!({"data": null}));
}

#[test]
fn test_unloaded_to_many_is_not_traversed() {
    let graph = graph();
    let mut post = article("1", "One");
    post.author = Some(person("9", "Dan"));

    let includes = graph.includes("articles", ["author.articles"]).unwrap();
    let doc = DocumentBuilder::new(&graph).single(Some(&post), &includes).unwrap();

    assert_eq!(doc.included.len(), 1);
    assert!(doc.included[0].relationships.is_empty());
}

// ============================================================================
// 6. Empty primary data
// ============================================================================

#[test]
fn test_missing_single_is_null_data() {
    let graph = graph();
    let doc = DocumentBuilder::new(&graph)
        .single::<common::Article>(None, &Includes::new())
        .unwrap();
    assert_eq!(doc.to_value().unwrap(), json!({"data": null}));
}

#[test]
fn test_empty_collection_is_empty_array() {
    let graph = graph();
    let none: Vec<common::Article> = Vec::new();
    let includes = graph.includes("articles", ["author"]).unwrap();
    let doc = DocumentBuilder::new(&graph).many(&none, &includes).unwrap();
    assert_eq!(doc.to_value().unwrap(), json!({"data": []}));
}

// ============================================================================
// 7. Nested chains through to-many relationships
// ============================================================================

#[test]
fn test_comment_authors_included_through_comments() {
    let graph = graph();
    let mut first = comment("5", "First!");
    first.author = Some(person("2", "Ann"));
    let mut second = comment("6", "Second!");
    second.author = Some(person("9", "Dan"));
    let mut post = article("1", "One");
    post.author = Some(person("9", "Dan"));
    post.comments = vec![first, second];

    let includes = graph.includes("articles", ["author", "comments.author"]).unwrap();
    let doc = DocumentBuilder::new(&graph).single(Some(&post), &includes).unwrap();

    let keys: Vec<String> = doc.included.iter().map(|r| r.identifier().to_string()).collect();
    assert_eq!(keys, ["people:9", "comments:5", "people:2", "comments:6"]);

    let five = doc.find_included(&ResourceIdentifier::new("comments", "5")).unwrap();
    assert_eq!(
        serde_json::to_value(five).unwrap(),
        json!({
            "type": "comments",
            "id": "5",
            "attributes": {"body": "First!"},
            "relationships": {"author": {"data": {"type": "people", "id": "2"}}}
        })
    );
}

#[test]
fn test_duplicate_include_paths_are_harmless() {
    let graph = graph();
    let mut post = article("1", "One");
    post.author = Some(person("9", "Dan"));

    let once = graph.includes("articles", ["author"]).unwrap();
    let twice = graph.includes("articles", ["author", "author"]).unwrap();
    assert_eq!(twice.len(), 1);

    let builder = DocumentBuilder::new(&graph);
    let a = builder.single(Some(&post), &once).unwrap();
    let b = builder.single(Some(&post), &twice).unwrap();
    assert_eq!(a.to_value().unwrap(), b.to_value().unwrap());
}

// ============================================================================
// 8. One resource reached through several chains or copies
// ============================================================================

#[test]
fn test_copies_with_different_loads_are_all_included() {
    let graph = graph();
    let mut narrow = person("9", "Dan");
    narrow.articles = Some(vec![article("1", "One")]);
    let mut wide = person("9", "Dan");
    wide.articles = Some(vec![article("1", "One"), article("2", "Two")]);
    let mut ten = article("10", "Ten");
    ten.author = Some(narrow);
    let mut eleven = article("11", "Eleven");
    eleven.author = Some(wide);

    let includes = graph.includes("articles", ["author.articles"]).unwrap();
    for posts in [[&ten, &eleven], [&eleven, &ten]] {
        let doc = DocumentBuilder::new(&graph).many(posts, &includes).unwrap();

        let keys: Vec<String> = doc.included.iter().map(|r| r.identifier().to_string()).collect();
        assert_eq!(keys.len(), 3);
        for key in ["people:9", "articles:1", "articles:2"] {
            assert!(keys.iter().any(|k| k == key), "{key} missing from {keys:?}");
        }

        let dan = doc.find_included(&ResourceIdentifier::new("people", "9")).unwrap();
        let linked: Vec<&str> = dan.relationship("articles").unwrap().data.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(linked.len(), 2);
        assert!(linked.contains(&"1") && linked.contains(&"2"));
    }
}

#[test]
fn test_two_chains_populate_different_slots_of_one_resource() {
    let graph = graph();
    let mut with_comments = article("2", "Two");
    with_comments.comments = vec![comment("7", "Nice")];
    let mut with_author = article("2", "Two");
    with_author.author = Some(person("9", "Dan"));

    let mut dan = person("9", "Dan");
    dan.articles = Some(vec![with_comments]);
    let mut eve = person("3", "Eve");
    eve.articles = Some(vec![with_author]);

    let mut post = article("1", "One");
    post.author = Some(dan);
    post.editor = Some(Some(eve));

    let includes = graph
        .includes("articles", ["author.articles.comments", "editor.articles.author"])
        .unwrap();
    let doc = DocumentBuilder::new(&graph).single(Some(&post), &includes).unwrap();

    let keys: Vec<String> = doc.included.iter().map(|r| r.identifier().to_string()).collect();
    assert_eq!(keys, ["people:9", "articles:2", "comments:7", "people:3"]);

    let two = doc.find_included(&ResourceIdentifier::new("articles", "2")).unwrap();
    assert_eq!(
        serde_json::to_value(&two.relationships).unwrap(),
        json!({
            "author": {"data": {"type": "people", "id": "9"}},
            "comments": {"data": [{"type": "comments", "id": "7"}]}
        })
    );
}

#[test]
fn test_shared_entity_is_expanded_once_per_chain() {
    let reads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&reads);
    let graph = ResourceGraph::builder()
        .add(
            ResourceDefinition::<common::Article>::new("articles", |a| Some(a.id.clone()))
                .to_one("author", "people", |a| a.author.as_ref()),
        )
        .add(
            ResourceDefinition::<common::Person>::new("people", |p| Some(p.id.clone())).relationship(
                RelationshipDescriptor::with_reader(
                    "people",
                    "articles",
                    Cardinality::ToMany,
                    "articles",
                    move |entity| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        let person = entity.downcast_ref::<common::Person>().expect("people entity");
                        Ok(match &person.articles {
                            Some(articles) => Related::Many(articles.iter().map(|a| a as &dyn Any).collect()),
                            None => Related::NotLoaded,
                        })
                    },
                ),
            ),
        )
        .build()
        .unwrap();

    let mut dan = person("9", "Dan");
    dan.articles = Some(vec![article("2", "Two")]);
    let mut post = article("1", "One");
    post.author = Some(dan);

    let includes = graph.includes("articles", ["author.articles"]).unwrap();
    let doc = DocumentBuilder::new(&graph).many([&post, &post, &post], &includes).unwrap();

    assert_eq!(doc.data.len(), 3);
    assert_eq!(doc.included.len(), 2);
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

// ============================================================================
// 9. Top-level members and serialization
// ============================================================================

#[test]
fn test_top_level_links_and_meta() {
    let graph = graph();
    let post = article("1", "One");

    let mut links = jsonapi_rs::Links::new();
    links.insert("self".into(), json!("/articles/1"));
    let mut meta = jsonapi_rs::Meta::new();
    meta.insert("copyright".into(), json!("Copyright 2026 Example Corp."));

    let doc = DocumentBuilder::new(&graph)
        .with_links(links)
        .with_meta(meta)
        .single(Some(&post), &Includes::new())
        .unwrap();
    let json = doc.to_value().unwrap();

    assert_eq!(json["links"], json!({"self": "/articles/1"}));
    assert_eq!(json["meta"], json!({"copyright": "Copyright 2026 Example Corp."}));
}

#[test]
fn test_json_output_is_parseable() {
    let graph = graph();
    let mut post = article("1", "One");
    post.author = Some(person("9", "Dan"));
    let includes = graph.includes("articles", ["author"]).unwrap();
    let doc = DocumentBuilder::new(&graph).single(Some(&post), &includes).unwrap();

    let compact: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    let pretty: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(compact, pretty);
    assert_eq!(compact, doc.to_value().unwrap());
}
