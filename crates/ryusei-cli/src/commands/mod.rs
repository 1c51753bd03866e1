pub mod config_ops;
pub mod graph_ops;
pub mod play_ops;
pub mod vocab_ops;
