pub mod graph;
pub mod matcher;
pub mod romaji;
pub mod selector;
pub mod settings;
pub mod vocab;
