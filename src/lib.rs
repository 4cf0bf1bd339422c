pub mod config;
pub mod ingest;
pub mod openwebui;
pub mod services;
pub mod web;
