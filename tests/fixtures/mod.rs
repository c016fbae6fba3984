//! Sample records shared by the integration tests.

use cando_search::{ItemId, LinkedType, Project, RankedResult, SearchableItem, Tag, Task};

/// A generic item with a single `name` field.
pub fn named_item(id: u64, name: &str) -> SearchableItem {
    SearchableItem::new(ItemId::from(id)).with_field("name", name)
}

/// Project Alpha, Alpha Project and Beta, in that order.
pub fn alpha_corpus() -> Vec<SearchableItem> {
    vec![
        named_item(1, "Project Alpha"),
        named_item(2, "Alpha Project"),
        named_item(3, "Beta"),
    ]
}

/// Projects with descriptions and tags.
#[allow(dead_code)]
pub fn sample_projects() -> Vec<Project> {
    vec![
        Project::new(1, "Café Renovation")
            .with_description("New counter, paint & lighting")
            .with_tags(["home", "spring"]),
        Project::new(2, "Garden Planning")
            .with_description("Raised beds for the vegetable patch")
            .with_tags(["outdoor", "spring"]),
        Project::new(3, "Quarterly Report").with_description("Numbers for Q3"),
        Project::new(4, "Crème Brûlée Workshop").with_tags(["cooking"]),
    ]
}

/// Tasks across the sample projects.
#[allow(dead_code)]
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(10, 1, "Buy paint").with_tags(["shopping"]),
        Task::new(11, 1, "Install lighting"),
        Task::new(12, 2, "Order seeds").with_description("Tomato, basil and peppers"),
        Task::new(13, 3, "Write report").with_description("Draft the quarterly report"),
        Task::new(14, 3, "Review report"),
        Task::new(15, 4, "Timer"),
        Task::new(16, 4, "Timeline"),
        Task::new(17, 4, "Task"),
    ]
}

/// Tags linked to the sample records.
#[allow(dead_code)]
pub fn sample_tags() -> Vec<Tag> {
    vec![
        Tag::new(100, "spring", LinkedType::Project, 1),
        Tag::new(101, "outdoor", LinkedType::Project, 2),
        Tag::new(102, "shopping", LinkedType::Task, 10),
    ]
}

/// IDs of results, in rank order.
#[allow(dead_code)]
pub fn ids(results: &[RankedResult]) -> Vec<String> {
    results.iter().map(|r| r.id().to_string()).collect()
}
