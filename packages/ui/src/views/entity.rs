//! Loading a single entity for a detail screen.

use api::{ApiError, Resource};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::feedback::surface_error;

#[derive(Clone, Debug, PartialEq)]
pub enum Loaded<E> {
    Loading,
    Ready(E),
    NotFound,
    Failed(Option<String>),
}

impl<E> Loaded<E> {
    pub fn from_result(context: &str, result: Result<E, ApiError>) -> Self {
        match result {
            Ok(entity) => Loaded::Ready(entity),
            Err(e) if e.is_not_found() => Loaded::NotFound,
            Err(e) => Loaded::Failed(surface_error(context, &e)),
        }
    }
}

/// Fetch `R` by id, refetching when `id` changes. The previous fetch is dropped.
pub fn use_entity<R: Resource>(id: i64) -> (Loaded<R::Entity>, dioxus::prelude::Resource<()>) {
    let api = use_api();
    let mut state = use_signal(|| Loaded::<R::Entity>::Loading);
    let fetch = use_resource(use_reactive!(|(id,)| {
        let api = api.clone();
        async move {
            state.set(Loaded::Loading);
            let result = api.fetch::<R>(id).await;
            state.set(Loaded::from_result(&format!("Loading {} {id}", R::LABEL), result));
        }
    }));
    (state(), fetch)
}
