// Content workspace: ideas, hooks, topics, drafts and the posting schedule.
// Handlers see only `ContentStore`; Postgres is the default backend.

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod models;
pub mod store;
