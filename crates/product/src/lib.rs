pub mod abstract_trait;
pub mod bootstrap;
pub mod di;
pub mod domain;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod service;
pub mod state;
pub mod validation;
