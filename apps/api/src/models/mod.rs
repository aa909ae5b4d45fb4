pub mod content;
pub mod voice;
