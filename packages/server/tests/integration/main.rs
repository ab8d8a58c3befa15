mod common;
mod documents;
mod health;
