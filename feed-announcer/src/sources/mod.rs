pub mod reddit;

pub use reddit::RedditSource;
