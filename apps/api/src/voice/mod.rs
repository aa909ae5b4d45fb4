// Voice profiles: stylistic signals extracted from a creator's own posts,
// used to steer draft generation toward their style.

pub mod extract;
pub mod handlers;
pub mod profile;
pub mod prompts;
